use async_trait::async_trait;

use crate::domain::{Agent, AgentId};

use super::RepositoryError;

#[async_trait]
pub trait AgentRepository: Send + Sync {
    async fn get_by_id(&self, id: AgentId) -> Result<Option<Agent>, RepositoryError>;

    /// Batch lookup for speaker resolution. Ids absent from the registry
    /// are simply not returned.
    async fn get_by_ids(&self, ids: &[AgentId]) -> Result<Vec<Agent>, RepositoryError>;
}
