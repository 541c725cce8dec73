mod health;
mod meetings;
mod webhook;

pub use health::health_handler;
pub use meetings::{
    create_meeting_handler, get_meeting_handler, get_transcript_handler, list_meetings_handler,
};
pub use webhook::webhook_handler;
