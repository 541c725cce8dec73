use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Agent, AgentId, Meeting, MeetingId, MeetingStatus, UserId};

use super::RepositoryError;

/// Filter and paging inputs for the meeting directory listing. `search`
/// is a case-insensitive substring match on the meeting name.
#[derive(Debug, Clone)]
pub struct MeetingListFilter {
    pub search: Option<String>,
    pub status: Option<MeetingStatus>,
    pub agent_id: Option<AgentId>,
    pub page: u32,
    pub page_size: u32,
}

/// A meeting joined with its assigned agent, plus the call duration in
/// seconds when both timestamps are set.
#[derive(Debug, Clone)]
pub struct MeetingWithAgent {
    pub meeting: Meeting,
    pub agent: Agent,
    pub duration_seconds: Option<f64>,
}

#[derive(Debug)]
pub struct MeetingPage {
    pub items: Vec<MeetingWithAgent>,
    pub total: u64,
    pub total_pages: u64,
}

/// Store for meeting records. Lifecycle transitions are expressed as
/// single atomic conditional updates so concurrent duplicate webhook
/// deliveries cannot race a read-then-write pair.
#[async_trait]
pub trait MeetingRepository: Send + Sync {
    async fn create(&self, meeting: &Meeting) -> Result<(), RepositoryError>;

    async fn get_owned(
        &self,
        id: MeetingId,
        owner: UserId,
    ) -> Result<Option<Meeting>, RepositoryError>;

    async fn get_owned_with_agent(
        &self,
        id: MeetingId,
        owner: UserId,
    ) -> Result<Option<MeetingWithAgent>, RepositoryError>;

    async fn list(
        &self,
        owner: UserId,
        filter: &MeetingListFilter,
    ) -> Result<MeetingPage, RepositoryError>;

    /// Atomically claims a meeting for session start: `upcoming ->
    /// active` with `started_at` set, guarded against every
    /// already-started or terminal state. Returns the assigned agent id,
    /// or `None` when the meeting is absent or the guard fails.
    async fn claim_for_start(
        &self,
        id: MeetingId,
        started_at: DateTime<Utc>,
    ) -> Result<Option<AgentId>, RepositoryError>;

    /// Compare-and-set `active -> processing` with `ended_at` set.
    /// Returns whether a row changed; a late or duplicate delivery
    /// changes nothing and that is not an error.
    async fn finish_if_active(
        &self,
        id: MeetingId,
        ended_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;

    /// Unconditional `transcript_url` write. Returns whether a row
    /// changed so the caller can distinguish a missing meeting.
    async fn set_transcript_url(
        &self,
        id: MeetingId,
        url: &str,
    ) -> Result<bool, RepositoryError>;

    /// Unconditional `recording_url` write. Returns whether a row changed.
    async fn set_recording_url(
        &self,
        id: MeetingId,
        url: &str,
    ) -> Result<bool, RepositoryError>;

    /// Terminal compare-and-set `processing -> completed`, applied once
    /// downstream processing finishes.
    async fn complete_if_processing(&self, id: MeetingId) -> Result<bool, RepositoryError>;
}
