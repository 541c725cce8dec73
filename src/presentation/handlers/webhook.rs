use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::WebhookError;
use crate::domain::{EventParseError, WebhookEvent};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Webhook receiver for the realtime provider. Order matters here:
/// headers, then signature over the raw bytes, and only then any body
/// parsing. Classification and the lifecycle transition run after.
#[tracing::instrument(skip(state, headers, body))]
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers.get("x-signature").and_then(|v| v.to_str().ok());
    let api_key = headers.get("x-api-key").and_then(|v| v.to_str().ok());

    let (Some(signature), Some(_api_key)) = (signature, api_key) else {
        tracing::warn!("Webhook request missing signature or API key header");
        return error_response(StatusCode::BAD_REQUEST, "Missing signature or API key");
    };

    if !state.signature.verify(&body, signature) {
        tracing::warn!("Webhook signature verification failed");
        return error_response(StatusCode::UNAUTHORIZED, "Invalid signature");
    }

    let event = match WebhookEvent::classify(&body) {
        Ok(event) => event,
        Err(EventParseError::InvalidJson) => {
            return error_response(StatusCode::BAD_REQUEST, "Invalid JSON");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Malformed webhook event");
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    match state.webhook_service.handle(event).await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusResponse {
                status: "ok".to_string(),
            }),
        )
            .into_response(),
        Err(e) => webhook_error_response(e),
    }
}

/// 4xx outcomes are deliberate answers the sender must not retry; only
/// 5xx responses are meant to trigger the provider's redelivery.
fn webhook_error_response(error: WebhookError) -> Response {
    match &error {
        WebhookError::Malformed(msg) => error_response(StatusCode::BAD_REQUEST, msg),
        WebhookError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
        WebhookError::Realtime(e) => {
            tracing::error!(error = %e, "Realtime provider call failed");
            error_response(StatusCode::BAD_GATEWAY, "Realtime provider unavailable")
        }
        WebhookError::Repository(e) => {
            tracing::error!(error = %e, "Meeting store unavailable");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Storage unavailable")
        }
        WebhookError::Dispatch(e) => {
            tracing::error!(error = %e, "Failed to enqueue processing job");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Job queue unavailable")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
