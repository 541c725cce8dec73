use async_trait::async_trait;

use crate::domain::MeetingId;

/// Payload of the `meetings/processing` job enqueued once a transcript
/// artifact becomes available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingJob {
    pub meeting_id: MeetingId,
    pub transcript_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("job queue unavailable: {0}")]
    QueueUnavailable(String),
}

/// Fire-and-forget dispatch of downstream processing work. Enqueue
/// failure is a request failure, since the job is the only path to
/// further processing.
#[async_trait]
pub trait JobDispatcher: Send + Sync {
    async fn enqueue(&self, job: ProcessingJob) -> Result<(), DispatchError>;
}
