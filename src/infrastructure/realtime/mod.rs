mod stream_video_client;
mod webhook_signature;

pub use stream_video_client::StreamVideoClient;
pub use webhook_signature::WebhookSignature;
