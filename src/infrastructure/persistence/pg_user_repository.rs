use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{RepositoryError, UserRepository};
use crate::domain::{User, UserId};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn get_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = ids.iter().map(|id| id.as_uuid()).collect();

        let rows = sqlx::query("SELECT id, name, image FROM users WHERE id = ANY($1)")
            .bind(&uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let map_err = |e: sqlx::Error| RepositoryError::QueryFailed(e.to_string());
                Ok(User {
                    id: UserId::from_uuid(row.try_get("id").map_err(map_err)?),
                    name: row.try_get("name").map_err(map_err)?,
                    image: row.try_get("image").map_err(map_err)?,
                })
            })
            .collect()
    }
}
