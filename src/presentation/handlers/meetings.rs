use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::{MeetingListFilter, MeetingWithAgent};
use crate::application::services::TranscriptError;
use crate::domain::{Agent, AgentId, Meeting, MeetingId, MeetingStatus, UserId};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct AgentResponse {
    pub id: String,
    pub name: String,
    pub instructions: String,
}

#[derive(Serialize)]
pub struct MeetingResponse {
    pub id: String,
    pub name: String,
    pub agent_id: String,
    pub status: String,
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
    pub transcript_url: Option<String>,
    pub recording_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentResponse>,
}

#[derive(Serialize)]
pub struct MeetingListResponse {
    pub items: Vec<MeetingResponse>,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Deserialize)]
pub struct CreateMeetingRequest {
    pub name: String,
    pub agent_id: String,
}

#[derive(Deserialize)]
pub struct ListMeetingsQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub agent_id: Option<String>,
}

#[tracing::instrument(skip(state, headers, request))]
pub async fn create_meeting_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateMeetingRequest>,
) -> Response {
    let owner = match current_user(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };

    let agent_id = match Uuid::parse_str(&request.agent_id) {
        Ok(uuid) => AgentId::from_uuid(uuid),
        Err(_) => return bad_request(&format!("Invalid agent id: {}", request.agent_id)),
    };

    let agent = match state.agents.get_by_id(agent_id).await {
        Ok(Some(agent)) => agent,
        Ok(None) => return not_found("Agent not found"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up agent");
            return internal_error("Failed to look up agent");
        }
    };

    let meeting = Meeting::new(owner, agent_id, request.name);

    if let Err(e) = state.meetings.create(&meeting).await {
        tracing::error!(error = %e, "Failed to create meeting");
        return internal_error("Failed to create meeting");
    }

    if let Err(e) = state
        .realtime
        .create_call(meeting.id, &meeting.name, owner)
        .await
    {
        tracing::error!(error = %e, "Failed to create provider call");
        return (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: "Realtime provider unavailable".to_string(),
            }),
        )
            .into_response();
    }

    if let Err(e) = state.realtime.register_agent(&agent).await {
        tracing::error!(error = %e, "Failed to register agent with provider");
        return (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: "Realtime provider unavailable".to_string(),
            }),
        )
            .into_response();
    }

    tracing::info!(
        meeting_id = %meeting.id.as_uuid(),
        agent_id = %agent_id.as_uuid(),
        "Meeting created"
    );

    (
        StatusCode::CREATED,
        Json(meeting_response(&meeting, Some(&agent), None)),
    )
        .into_response()
}

#[tracing::instrument(skip(state, headers, query))]
pub async fn list_meetings_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListMeetingsQuery>,
) -> Response {
    let owner = match current_user(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };

    let page_size = query.page_size.unwrap_or(state.pagination.default_page_size);
    if page_size < state.pagination.min_page_size || page_size > state.pagination.max_page_size {
        return bad_request(&format!(
            "page_size must be between {} and {}",
            state.pagination.min_page_size, state.pagination.max_page_size
        ));
    }

    let status = match &query.status {
        Some(raw) => match raw.parse::<MeetingStatus>() {
            Ok(status) => Some(status),
            Err(e) => return bad_request(&e),
        },
        None => None,
    };

    let agent_id = match &query.agent_id {
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(uuid) => Some(AgentId::from_uuid(uuid)),
            Err(_) => return bad_request(&format!("Invalid agent id: {}", raw)),
        },
        None => None,
    };

    let filter = MeetingListFilter {
        search: query.search.filter(|s| !s.is_empty()),
        status,
        agent_id,
        page: query.page.unwrap_or(1).max(1),
        page_size,
    };

    match state.meetings.list(owner, &filter).await {
        Ok(page) => {
            let items = page
                .items
                .iter()
                .map(|item| joined_response(item))
                .collect();
            (
                StatusCode::OK,
                Json(MeetingListResponse {
                    items,
                    total: page.total,
                    total_pages: page.total_pages,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list meetings");
            internal_error("Failed to list meetings")
        }
    }
}

#[tracing::instrument(skip(state, headers))]
pub async fn get_meeting_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(meeting_id): Path<String>,
) -> Response {
    let owner = match current_user(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };

    let id = match parse_meeting_id(&meeting_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.meetings.get_owned_with_agent(id, owner).await {
        Ok(Some(item)) => (StatusCode::OK, Json(joined_response(&item))).into_response(),
        Ok(None) => not_found("Meeting not found"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch meeting");
            internal_error("Failed to fetch meeting")
        }
    }
}

#[tracing::instrument(skip(state, headers))]
pub async fn get_transcript_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(meeting_id): Path<String>,
) -> Response {
    let owner = match current_user(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };

    let id = match parse_meeting_id(&meeting_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.transcript_service.get_transcript(id, owner).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(TranscriptError::NotFound) => not_found("Meeting not found"),
        Err(TranscriptError::Repository(e)) => {
            tracing::error!(error = %e, "Failed to reconcile transcript");
            internal_error("Failed to fetch transcript")
        }
    }
}

/// Opaque current-user lookup: session mechanics live elsewhere, this
/// service only sees the resolved id.
fn current_user(headers: &HeaderMap) -> Result<UserId, Response> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .map(UserId::from_uuid)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Unauthorized".to_string(),
                }),
            )
                .into_response()
        })
}

fn parse_meeting_id(raw: &str) -> Result<MeetingId, Response> {
    Uuid::parse_str(raw)
        .map(MeetingId::from_uuid)
        .map_err(|_| bad_request(&format!("Invalid meeting id: {}", raw)))
}

fn joined_response(item: &MeetingWithAgent) -> MeetingResponse {
    meeting_response(&item.meeting, Some(&item.agent), item.duration_seconds)
}

fn meeting_response(
    meeting: &Meeting,
    agent: Option<&Agent>,
    duration_seconds: Option<f64>,
) -> MeetingResponse {
    MeetingResponse {
        id: meeting.id.as_uuid().to_string(),
        name: meeting.name.clone(),
        agent_id: meeting.agent_id.as_uuid().to_string(),
        status: meeting.status.as_str().to_string(),
        started_at: meeting.started_at.map(|t| t.to_rfc3339()),
        ended_at: meeting.ended_at.map(|t| t.to_rfc3339()),
        transcript_url: meeting.transcript_url.clone(),
        recording_url: meeting.recording_url.clone(),
        created_at: meeting.created_at.to_rfc3339(),
        updated_at: meeting.updated_at.to_rfc3339(),
        duration_seconds,
        agent: agent.map(|a| AgentResponse {
            id: a.id.as_uuid().to_string(),
            name: a.name.clone(),
            instructions: a.instructions.clone(),
        }),
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn not_found(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
