use async_trait::async_trait;

use crate::domain::{Agent, MeetingId, UserId};

#[derive(Debug, thiserror::Error)]
pub enum RealtimeError {
    #[error("provider request failed: {0}")]
    RequestFailed(String),
    #[error("provider rejected the request: {0}")]
    Rejected(String),
}

/// The external realtime audio/video provider. Calls are keyed by
/// meeting id; the provider owns call liveness and timeout policy.
#[async_trait]
pub trait RealtimeSessions: Send + Sync {
    /// Creates the provider-side call for a newly scheduled meeting,
    /// with transcription and recording switched on.
    async fn create_call(
        &self,
        meeting_id: MeetingId,
        meeting_name: &str,
        created_by: UserId,
    ) -> Result<(), RealtimeError>;

    /// Registers the agent as a known call participant with the provider.
    async fn register_agent(&self, agent: &Agent) -> Result<(), RealtimeError>;

    /// Connects the agent into the live call and pushes its behavior
    /// instructions into the session.
    async fn start_agent_session(
        &self,
        meeting_id: MeetingId,
        agent: &Agent,
    ) -> Result<(), RealtimeError>;

    /// Ends the call. Ending an already-ended call is a no-op.
    async fn end_call(&self, meeting_id: MeetingId) -> Result<(), RealtimeError>;
}
