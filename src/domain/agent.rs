use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentId(Uuid);

impl AgentId {
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

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

/// An AI agent owned by a user. `instructions` is free text handed to the
/// realtime session when the agent joins a call.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub user_id: UserId,
    pub name: String,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Agent {
    pub fn new(user_id: UserId, name: String, instructions: String) -> Self {
        let now = Utc::now();
        Self {
            id: AgentId::new(),
            user_id,
            name,
            instructions,
            created_at: now,
            updated_at: now,
        }
    }
}
