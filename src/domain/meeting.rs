use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{AgentId, MeetingStatus, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeetingId(Uuid);

impl MeetingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MeetingId {
    fn default() -> Self {
        Self::new()
    }
}

/// A scheduled meeting between its owning user and an assigned AI agent.
///
/// `transcript_url` and `recording_url` point at externally stored
/// artifacts and are each set at most once, by exactly one webhook event
/// kind. `started_at <= ended_at` whenever both are set.
#[derive(Debug, Clone)]
pub struct Meeting {
    pub id: MeetingId,
    pub user_id: UserId,
    pub agent_id: AgentId,
    pub name: String,
    pub status: MeetingStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub transcript_url: Option<String>,
    pub recording_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meeting {
    pub fn new(user_id: UserId, agent_id: AgentId, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: MeetingId::new(),
            user_id,
            agent_id,
            name,
            status: MeetingStatus::Upcoming,
            started_at: None,
            ended_at: None,
            transcript_url: None,
            recording_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
