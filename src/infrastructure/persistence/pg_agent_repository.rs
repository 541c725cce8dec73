use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{AgentRepository, RepositoryError};
use crate::domain::{Agent, AgentId, UserId};

pub struct PgAgentRepository {
    pool: PgPool,
}

impl PgAgentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgentRepository for PgAgentRepository {
    #[instrument(skip(self), fields(agent_id = %id.as_uuid()))]
    async fn get_by_id(&self, id: AgentId) -> Result<Option<Agent>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, instructions, created_at, updated_at
            FROM agents
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.map(|r| agent_from_row(&r)).transpose()
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn get_by_ids(&self, ids: &[AgentId]) -> Result<Vec<Agent>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = ids.iter().map(|id| id.as_uuid()).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, instructions, created_at, updated_at
            FROM agents
            WHERE id = ANY($1)
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        rows.iter().map(agent_from_row).collect()
    }
}

fn agent_from_row(row: &PgRow) -> Result<Agent, RepositoryError> {
    let map_err = |e: sqlx::Error| RepositoryError::QueryFailed(e.to_string());

    Ok(Agent {
        id: AgentId::from_uuid(row.try_get("id").map_err(map_err)?),
        user_id: UserId::from_uuid(row.try_get("user_id").map_err(map_err)?),
        name: row.try_get("name").map_err(map_err)?,
        instructions: row.try_get("instructions").map_err(map_err)?,
        created_at: row.try_get("created_at").map_err(map_err)?,
        updated_at: row.try_get("updated_at").map_err(map_err)?,
    })
}
