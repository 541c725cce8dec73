mod processing_worker;
mod transcript_service;
mod webhook_service;

pub use processing_worker::ProcessingWorker;
pub use transcript_service::{TranscriptError, TranscriptService};
pub use webhook_service::{WebhookError, WebhookService};
