use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{
    MeetingListFilter, MeetingPage, MeetingRepository, MeetingWithAgent, RepositoryError,
};
use crate::domain::{Agent, AgentId, Meeting, MeetingId, MeetingStatus, UserId};

const JOINED_COLUMNS: &str = "m.id, m.user_id, m.agent_id, m.name, m.status, m.started_at, \
     m.ended_at, m.transcript_url, m.recording_url, m.created_at, m.updated_at, \
     a.id AS agent_agent_id, a.user_id AS agent_user_id, a.name AS agent_name, \
     a.instructions AS agent_instructions, a.created_at AS agent_created_at, \
     a.updated_at AS agent_updated_at, \
     EXTRACT(EPOCH FROM (m.ended_at - m.started_at))::float8 AS duration_seconds";

pub struct PgMeetingRepository {
    pool: PgPool,
}

impl PgMeetingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MeetingRepository for PgMeetingRepository {
    #[instrument(skip(self, meeting), fields(meeting_id = %meeting.id.as_uuid()))]
    async fn create(&self, meeting: &Meeting) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO meetings
                (id, user_id, agent_id, name, status, started_at, ended_at,
                 transcript_url, recording_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(meeting.id.as_uuid())
        .bind(meeting.user_id.as_uuid())
        .bind(meeting.agent_id.as_uuid())
        .bind(&meeting.name)
        .bind(meeting.status.as_str())
        .bind(meeting.started_at)
        .bind(meeting.ended_at)
        .bind(&meeting.transcript_url)
        .bind(&meeting.recording_url)
        .bind(meeting.created_at)
        .bind(meeting.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(meeting_id = %id.as_uuid()))]
    async fn get_owned(
        &self,
        id: MeetingId,
        owner: UserId,
    ) -> Result<Option<Meeting>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, agent_id, name, status, started_at, ended_at,
                   transcript_url, recording_url, created_at, updated_at
            FROM meetings
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.map(|r| meeting_from_row(&r)).transpose()
    }

    #[instrument(skip(self), fields(meeting_id = %id.as_uuid()))]
    async fn get_owned_with_agent(
        &self,
        id: MeetingId,
        owner: UserId,
    ) -> Result<Option<MeetingWithAgent>, RepositoryError> {
        let sql = format!(
            "SELECT {JOINED_COLUMNS} FROM meetings m \
             JOIN agents a ON a.id = m.agent_id \
             WHERE m.id = $1 AND m.user_id = $2"
        );

        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(owner.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.map(|r| joined_from_row(&r)).transpose()
    }

    #[instrument(skip(self, filter), fields(page = filter.page, page_size = filter.page_size))]
    async fn list(
        &self,
        owner: UserId,
        filter: &MeetingListFilter,
    ) -> Result<MeetingPage, RepositoryError> {
        let page_size = filter.page_size.max(1);
        let offset = page_offset(filter.page, page_size);

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {JOINED_COLUMNS} FROM meetings m JOIN agents a ON a.id = m.agent_id"
        ));
        push_filters(&mut query, owner, filter);
        query
            .push(" ORDER BY m.created_at DESC, m.id DESC LIMIT ")
            .push_bind(i64::from(page_size))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        let items: Vec<MeetingWithAgent> = rows
            .iter()
            .map(joined_from_row)
            .collect::<Result<_, _>>()?;

        let mut count_query = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) AS total FROM meetings m JOIN agents a ON a.id = m.agent_id",
        );
        push_filters(&mut count_query, owner, filter);

        let count_row = count_query
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        let total: i64 = count_row
            .try_get("total")
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        let total = total as u64;
        let total_pages = total.div_ceil(page_size as u64);

        Ok(MeetingPage {
            items,
            total,
            total_pages,
        })
    }

    #[instrument(skip(self), fields(meeting_id = %id.as_uuid()))]
    async fn claim_for_start(
        &self,
        id: MeetingId,
        started_at: DateTime<Utc>,
    ) -> Result<Option<AgentId>, RepositoryError> {
        let row = sqlx::query(
            r#"
            UPDATE meetings
            SET status = 'active', started_at = $2, updated_at = $2
            WHERE id = $1
              AND status NOT IN ('completed', 'active', 'cancelled', 'processing')
            RETURNING agent_id
            "#,
        )
        .bind(id.as_uuid())
        .bind(started_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        match row {
            Some(r) => {
                let agent_id: Uuid = r
                    .try_get("agent_id")
                    .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
                Ok(Some(AgentId::from_uuid(agent_id)))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self), fields(meeting_id = %id.as_uuid()))]
    async fn finish_if_active(
        &self,
        id: MeetingId,
        ended_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE meetings
            SET status = 'processing', ended_at = $2, updated_at = $2
            WHERE id = $1 AND status = 'active'
            "#,
        )
        .bind(id.as_uuid())
        .bind(ended_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, url), fields(meeting_id = %id.as_uuid()))]
    async fn set_transcript_url(
        &self,
        id: MeetingId,
        url: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE meetings SET transcript_url = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(url)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, url), fields(meeting_id = %id.as_uuid()))]
    async fn set_recording_url(
        &self,
        id: MeetingId,
        url: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE meetings SET recording_url = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(url)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(meeting_id = %id.as_uuid()))]
    async fn complete_if_processing(&self, id: MeetingId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE meetings
            SET status = 'completed', updated_at = $2
            WHERE id = $1 AND status = 'processing'
            "#,
        )
        .bind(id.as_uuid())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

// Duplicate ids, foreign keys and the status CHECK all surface as
// database errors with a constraint name attached.
fn map_insert_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.constraint().is_some() => {
            RepositoryError::ConstraintViolation(db.to_string())
        }
        _ => RepositoryError::QueryFailed(e.to_string()),
    }
}

// Widened before multiplying so a huge page number cannot overflow u32.
fn page_offset(page: u32, page_size: u32) -> i64 {
    (i64::from(page.max(1)) - 1) * i64::from(page_size)
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, owner: UserId, filter: &MeetingListFilter) {
    query.push(" WHERE m.user_id = ").push_bind(owner.as_uuid());

    if let Some(search) = &filter.search {
        query
            .push(" AND m.name ILIKE ")
            .push_bind(format!("%{}%", search));
    }
    if let Some(status) = filter.status {
        query.push(" AND m.status = ").push_bind(status.as_str());
    }
    if let Some(agent_id) = filter.agent_id {
        query.push(" AND m.agent_id = ").push_bind(agent_id.as_uuid());
    }
}

fn meeting_from_row(row: &PgRow) -> Result<Meeting, RepositoryError> {
    let map_err = |e: sqlx::Error| RepositoryError::QueryFailed(e.to_string());

    let status: String = row.try_get("status").map_err(map_err)?;
    let status = status
        .parse::<MeetingStatus>()
        .map_err(RepositoryError::QueryFailed)?;

    Ok(Meeting {
        id: MeetingId::from_uuid(row.try_get("id").map_err(map_err)?),
        user_id: UserId::from_uuid(row.try_get("user_id").map_err(map_err)?),
        agent_id: AgentId::from_uuid(row.try_get("agent_id").map_err(map_err)?),
        name: row.try_get("name").map_err(map_err)?,
        status,
        started_at: row.try_get("started_at").map_err(map_err)?,
        ended_at: row.try_get("ended_at").map_err(map_err)?,
        transcript_url: row.try_get("transcript_url").map_err(map_err)?,
        recording_url: row.try_get("recording_url").map_err(map_err)?,
        created_at: row.try_get("created_at").map_err(map_err)?,
        updated_at: row.try_get("updated_at").map_err(map_err)?,
    })
}

fn joined_from_row(row: &PgRow) -> Result<MeetingWithAgent, RepositoryError> {
    let map_err = |e: sqlx::Error| RepositoryError::QueryFailed(e.to_string());

    let meeting = meeting_from_row(row)?;
    let agent = Agent {
        id: AgentId::from_uuid(row.try_get("agent_agent_id").map_err(map_err)?),
        user_id: UserId::from_uuid(row.try_get("agent_user_id").map_err(map_err)?),
        name: row.try_get("agent_name").map_err(map_err)?,
        instructions: row.try_get("agent_instructions").map_err(map_err)?,
        created_at: row.try_get("agent_created_at").map_err(map_err)?,
        updated_at: row.try_get("agent_updated_at").map_err(map_err)?,
    };
    let duration_seconds: Option<f64> = row.try_get("duration_seconds").map_err(map_err)?;

    Ok(MeetingWithAgent {
        meeting,
        agent,
        duration_seconds,
    })
}
