use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::RepositoryError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Batch lookup for speaker resolution. Ids absent from the registry
    /// are simply not returned.
    async fn get_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError>;
}
