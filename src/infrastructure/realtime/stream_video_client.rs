use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::application::ports::{RealtimeError, RealtimeSessions};
use crate::domain::{Agent, AvatarVariant, MeetingId, UserId, avatar_uri};

/// HTTP client for the realtime video provider. Calls are created and
/// ended under the `default` call type; agent sessions are connected
/// into a live call and driven by instruction updates.
pub struct StreamVideoClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl StreamVideoClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<reqwest::Response, RealtimeError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .header("Authorization", self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| RealtimeError::RequestFailed(e.to_string()))?;

        Ok(response)
    }

    async fn post_ok(&self, path: &str, body: Value) -> Result<(), RealtimeError> {
        let response = self.post(path, body).await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RealtimeError::Rejected(format!("HTTP {}: {}", status, body)));
        }
        Ok(())
    }
}

#[async_trait]
impl RealtimeSessions for StreamVideoClient {
    async fn create_call(
        &self,
        meeting_id: MeetingId,
        meeting_name: &str,
        created_by: UserId,
    ) -> Result<(), RealtimeError> {
        let body = json!({
            "data": {
                "created_by_id": created_by.as_uuid().to_string(),
                "custom": {
                    "meetingId": meeting_id.as_uuid().to_string(),
                    "meetingName": meeting_name,
                },
                "settings_override": {
                    "transcription": {
                        "language": "en",
                        "mode": "auto-on",
                        "closed_caption_mode": "auto-on",
                    },
                    "recording": {
                        "mode": "auto-on",
                        "quality": "1080p",
                    },
                },
            },
        });

        self.post_ok(&format!("call/default/{}", meeting_id.as_uuid()), body)
            .await
    }

    async fn register_agent(&self, agent: &Agent) -> Result<(), RealtimeError> {
        let body = json!({
            "users": [{
                "id": agent.id.as_uuid().to_string(),
                "name": agent.name,
                "role": "user",
                "image": avatar_uri(&agent.name, AvatarVariant::BotttsNeutral),
            }],
        });

        self.post_ok("users", body).await
    }

    async fn start_agent_session(
        &self,
        meeting_id: MeetingId,
        agent: &Agent,
    ) -> Result<(), RealtimeError> {
        let call = meeting_id.as_uuid();

        self.post_ok(
            &format!("call/default/{}/agent_session", call),
            json!({ "agent_user_id": agent.id.as_uuid().to_string() }),
        )
        .await?;

        self.post_ok(
            &format!("call/default/{}/agent_session/session", call),
            json!({ "instructions": agent.instructions }),
        )
        .await
    }

    async fn end_call(&self, meeting_id: MeetingId) -> Result<(), RealtimeError> {
        let response = self
            .post(
                &format!("call/default/{}/mark_ended", meeting_id.as_uuid()),
                json!({}),
            )
            .await?;

        // The provider answers 404 once a call is gone; ending an
        // already-ended call is a no-op, not a failure.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RealtimeError::Rejected(format!("HTTP {}: {}", status, body)));
        }
        Ok(())
    }
}
