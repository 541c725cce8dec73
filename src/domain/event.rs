use serde::Deserialize;
use serde_json::Value;

use super::CompositeCallId;

/// A classified provider webhook event. The provider emits more event
/// kinds than the lifecycle reacts to; anything unrecognized is carried
/// as `Ignored` so the handler can acknowledge it without acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    SessionStarted { meeting_id: String },
    ParticipantLeft { meeting_id: String },
    SessionEnded { meeting_id: String },
    TranscriptionReady { meeting_id: String, url: String },
    RecordingReady { meeting_id: String, url: String },
    Ignored(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EventParseError {
    #[error("invalid JSON payload")]
    InvalidJson,
    #[error("missing meetingId in {0} event")]
    MissingMeetingId(&'static str),
    #[error("malformed {event} event: {reason}")]
    MalformedEvent { event: &'static str, reason: String },
}

#[derive(Deserialize)]
struct CallEnvelope {
    call: CallPayload,
}

#[derive(Deserialize)]
struct CallPayload {
    #[serde(default)]
    custom: CallCustom,
}

#[derive(Default, Deserialize)]
struct CallCustom {
    #[serde(rename = "meetingId")]
    meeting_id: Option<String>,
}

#[derive(Deserialize)]
struct CidEnvelope {
    call_cid: String,
}

#[derive(Deserialize)]
struct TranscriptionEnvelope {
    call_cid: String,
    call_transcription: ArtifactPayload,
}

#[derive(Deserialize)]
struct RecordingEnvelope {
    call_cid: String,
    call_recording: ArtifactPayload,
}

#[derive(Deserialize)]
struct ArtifactPayload {
    url: String,
}

impl WebhookEvent {
    /// Parses a raw webhook body into a classified event.
    ///
    /// Invalid JSON is a hard error; an unknown `type` discriminator is
    /// not, since the provider may emit event kinds the lifecycle does
    /// not react to.
    pub fn classify(raw: &[u8]) -> Result<Self, EventParseError> {
        let value: Value =
            serde_json::from_slice(raw).map_err(|_| EventParseError::InvalidJson)?;

        let event_type = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match event_type.as_str() {
            "call.session_started" => {
                let meeting_id = custom_meeting_id(value, "call.session_started")?;
                Ok(WebhookEvent::SessionStarted { meeting_id })
            }
            "call.session_ended" => {
                let meeting_id = custom_meeting_id(value, "call.session_ended")?;
                Ok(WebhookEvent::SessionEnded { meeting_id })
            }
            "call.session_participant_left" => {
                let envelope: CidEnvelope = deserialize(value, "call.session_participant_left")?;
                let cid = parse_cid(&envelope.call_cid, "call.session_participant_left")?;
                Ok(WebhookEvent::ParticipantLeft {
                    meeting_id: cid.meeting_id,
                })
            }
            "call.transcription_ready" => {
                let envelope: TranscriptionEnvelope =
                    deserialize(value, "call.transcription_ready")?;
                let cid = parse_cid(&envelope.call_cid, "call.transcription_ready")?;
                Ok(WebhookEvent::TranscriptionReady {
                    meeting_id: cid.meeting_id,
                    url: envelope.call_transcription.url,
                })
            }
            "call.recording_ready" => {
                let envelope: RecordingEnvelope = deserialize(value, "call.recording_ready")?;
                let cid = parse_cid(&envelope.call_cid, "call.recording_ready")?;
                Ok(WebhookEvent::RecordingReady {
                    meeting_id: cid.meeting_id,
                    url: envelope.call_recording.url,
                })
            }
            _ => Ok(WebhookEvent::Ignored(event_type)),
        }
    }
}

fn deserialize<T: serde::de::DeserializeOwned>(
    value: Value,
    event: &'static str,
) -> Result<T, EventParseError> {
    serde_json::from_value(value).map_err(|e| EventParseError::MalformedEvent {
        event,
        reason: e.to_string(),
    })
}

fn custom_meeting_id(value: Value, event: &'static str) -> Result<String, EventParseError> {
    let envelope: CallEnvelope = deserialize(value, event)?;
    envelope
        .call
        .custom
        .meeting_id
        .filter(|id| !id.is_empty())
        .ok_or(EventParseError::MissingMeetingId(event))
}

fn parse_cid(raw: &str, event: &'static str) -> Result<CompositeCallId, EventParseError> {
    raw.parse()
        .map_err(|e: super::CallIdParseError| EventParseError::MalformedEvent {
            event,
            reason: e.to_string(),
        })
}
