use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::{
    AgentRepository, DispatchError, JobDispatcher, MeetingRepository, ProcessingJob,
    RealtimeError, RealtimeSessions, RepositoryError,
};
use crate::domain::{MeetingId, WebhookEvent};

/// The meeting lifecycle state machine. Applies a classified provider
/// event as a guarded transition on the meeting store and triggers the
/// corresponding side effect. Safe under concurrent at-least-once
/// delivery: every transition is either an atomic conditional update or
/// a naturally idempotent unconditional field write.
pub struct WebhookService {
    meetings: Arc<dyn MeetingRepository>,
    agents: Arc<dyn AgentRepository>,
    realtime: Arc<dyn RealtimeSessions>,
    dispatcher: Arc<dyn JobDispatcher>,
}

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("invalid payload: {0}")]
    Malformed(String),
    #[error("{0}")]
    NotFound(String),
    #[error("realtime provider: {0}")]
    Realtime(#[from] RealtimeError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("job dispatch: {0}")]
    Dispatch(#[from] DispatchError),
}

impl WebhookService {
    pub fn new(
        meetings: Arc<dyn MeetingRepository>,
        agents: Arc<dyn AgentRepository>,
        realtime: Arc<dyn RealtimeSessions>,
        dispatcher: Arc<dyn JobDispatcher>,
    ) -> Self {
        Self {
            meetings,
            agents,
            realtime,
            dispatcher,
        }
    }

    #[tracing::instrument(skip(self, event))]
    pub async fn handle(&self, event: WebhookEvent) -> Result<(), WebhookError> {
        match event {
            WebhookEvent::SessionStarted { meeting_id } => {
                self.session_started(parse_meeting_id(&meeting_id)?).await
            }
            WebhookEvent::ParticipantLeft { meeting_id } => {
                self.participant_left(parse_meeting_id(&meeting_id)?).await
            }
            WebhookEvent::SessionEnded { meeting_id } => {
                self.session_ended(parse_meeting_id(&meeting_id)?).await
            }
            WebhookEvent::TranscriptionReady { meeting_id, url } => {
                self.transcription_ready(parse_meeting_id(&meeting_id)?, url)
                    .await
            }
            WebhookEvent::RecordingReady { meeting_id, url } => {
                self.recording_ready(parse_meeting_id(&meeting_id)?, url)
                    .await
            }
            WebhookEvent::Ignored(event_type) => {
                tracing::debug!(event_type = %event_type, "Ignoring unhandled event type");
                Ok(())
            }
        }
    }

    /// `upcoming -> active`. The guard doubles as duplicate-delivery
    /// protection: a meeting already active (or past it) claims no row
    /// and the event answers NotFound without mutating anything. The
    /// status flip commits before the realtime session starts; a crash
    /// between the two leaves a meeting marked active with no live
    /// session, which is recoverable, unlike a live session with no
    /// record.
    async fn session_started(&self, id: MeetingId) -> Result<(), WebhookError> {
        let agent_id = self
            .meetings
            .claim_for_start(id, Utc::now())
            .await?
            .ok_or_else(|| {
                WebhookError::NotFound("meeting not found or already started".to_string())
            })?;

        let agent = self
            .agents
            .get_by_id(agent_id)
            .await?
            .ok_or_else(|| WebhookError::NotFound("agent not found".to_string()))?;

        self.realtime.start_agent_session(id, &agent).await?;

        tracing::info!(
            meeting_id = %id.as_uuid(),
            agent_id = %agent.id.as_uuid(),
            "Meeting active, agent session started"
        );
        Ok(())
    }

    /// No meeting-store mutation; the provider is authoritative for call
    /// liveness, so the call is ended regardless of local bookkeeping.
    async fn participant_left(&self, id: MeetingId) -> Result<(), WebhookError> {
        self.realtime.end_call(id).await?;
        tracing::info!(meeting_id = %id.as_uuid(), "Call ended after participant left");
        Ok(())
    }

    /// `active -> processing` as a compare-and-set. A late or duplicate
    /// ended event finds nothing active and changes nothing.
    async fn session_ended(&self, id: MeetingId) -> Result<(), WebhookError> {
        let changed = self.meetings.finish_if_active(id, Utc::now()).await?;
        if changed {
            tracing::info!(meeting_id = %id.as_uuid(), "Meeting moved to processing");
        } else {
            tracing::debug!(
                meeting_id = %id.as_uuid(),
                "Session ended for a meeting that is not active; ignoring"
            );
        }
        Ok(())
    }

    async fn transcription_ready(&self, id: MeetingId, url: String) -> Result<(), WebhookError> {
        let updated = self.meetings.set_transcript_url(id, &url).await?;
        if !updated {
            return Err(WebhookError::NotFound("meeting not found".to_string()));
        }

        self.dispatcher
            .enqueue(ProcessingJob {
                meeting_id: id,
                transcript_url: url,
            })
            .await?;

        tracing::info!(meeting_id = %id.as_uuid(), "Transcript stored, processing job enqueued");
        Ok(())
    }

    async fn recording_ready(&self, id: MeetingId, url: String) -> Result<(), WebhookError> {
        let updated = self.meetings.set_recording_url(id, &url).await?;
        if !updated {
            return Err(WebhookError::NotFound("meeting not found".to_string()));
        }
        tracing::info!(meeting_id = %id.as_uuid(), "Recording URL stored");
        Ok(())
    }
}

fn parse_meeting_id(raw: &str) -> Result<MeetingId, WebhookError> {
    Uuid::parse_str(raw)
        .map(MeetingId::from_uuid)
        .map_err(|_| WebhookError::Malformed(format!("invalid meeting id: {}", raw)))
}
