use std::sync::Arc;

use crate::application::ports::{AgentRepository, MeetingRepository, RealtimeSessions};
use crate::application::services::{TranscriptService, WebhookService};
use crate::infrastructure::realtime::WebhookSignature;
use crate::presentation::config::PaginationSettings;

#[derive(Clone)]
pub struct AppState {
    pub webhook_service: Arc<WebhookService>,
    pub transcript_service: Arc<TranscriptService>,
    pub meetings: Arc<dyn MeetingRepository>,
    pub agents: Arc<dyn AgentRepository>,
    pub realtime: Arc<dyn RealtimeSessions>,
    pub signature: WebhookSignature,
    pub pagination: PaginationSettings,
}
