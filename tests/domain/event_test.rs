use parley::domain::{EventParseError, WebhookEvent};
use serde_json::json;

#[test]
fn classifies_session_started() {
    let body = json!({
        "type": "call.session_started",
        "call": { "custom": { "meetingId": "m-1" } },
    });

    let event = WebhookEvent::classify(body.to_string().as_bytes()).unwrap();
    assert_eq!(
        event,
        WebhookEvent::SessionStarted {
            meeting_id: "m-1".to_string()
        }
    );
}

#[test]
fn classifies_session_ended() {
    let body = json!({
        "type": "call.session_ended",
        "call": { "custom": { "meetingId": "m-2" } },
    });

    let event = WebhookEvent::classify(body.to_string().as_bytes()).unwrap();
    assert_eq!(
        event,
        WebhookEvent::SessionEnded {
            meeting_id: "m-2".to_string()
        }
    );
}

#[test]
fn classifies_participant_left_from_call_cid() {
    let body = json!({
        "type": "call.session_participant_left",
        "call_cid": "default:m-3",
    });

    let event = WebhookEvent::classify(body.to_string().as_bytes()).unwrap();
    assert_eq!(
        event,
        WebhookEvent::ParticipantLeft {
            meeting_id: "m-3".to_string()
        }
    );
}

#[test]
fn classifies_transcription_ready_with_url() {
    let body = json!({
        "type": "call.transcription_ready",
        "call_cid": "default:m-4",
        "call_transcription": { "url": "https://example.com/t.jsonl" },
    });

    let event = WebhookEvent::classify(body.to_string().as_bytes()).unwrap();
    assert_eq!(
        event,
        WebhookEvent::TranscriptionReady {
            meeting_id: "m-4".to_string(),
            url: "https://example.com/t.jsonl".to_string(),
        }
    );
}

#[test]
fn classifies_recording_ready_with_url() {
    let body = json!({
        "type": "call.recording_ready",
        "call_cid": "default:m-5",
        "call_recording": { "url": "https://example.com/r.mp4" },
    });

    let event = WebhookEvent::classify(body.to_string().as_bytes()).unwrap();
    assert_eq!(
        event,
        WebhookEvent::RecordingReady {
            meeting_id: "m-5".to_string(),
            url: "https://example.com/r.mp4".to_string(),
        }
    );
}

#[test]
fn unknown_event_type_is_ignored_not_rejected() {
    let body = json!({ "type": "call.reaction_new", "call_cid": "default:m-6" });

    let event = WebhookEvent::classify(body.to_string().as_bytes()).unwrap();
    assert_eq!(event, WebhookEvent::Ignored("call.reaction_new".to_string()));
}

#[test]
fn missing_type_field_is_ignored() {
    let event = WebhookEvent::classify(b"{}").unwrap();
    assert_eq!(event, WebhookEvent::Ignored(String::new()));
}

#[test]
fn invalid_json_is_a_parse_error() {
    let result = WebhookEvent::classify(b"{ nope");
    assert!(matches!(result, Err(EventParseError::InvalidJson)));
}

#[test]
fn session_started_without_meeting_id_is_an_error() {
    let body = json!({ "type": "call.session_started", "call": { "custom": {} } });

    let result = WebhookEvent::classify(body.to_string().as_bytes());
    assert!(matches!(
        result,
        Err(EventParseError::MissingMeetingId("call.session_started"))
    ));
}

#[test]
fn session_started_with_empty_meeting_id_is_an_error() {
    let body = json!({
        "type": "call.session_started",
        "call": { "custom": { "meetingId": "" } },
    });

    assert!(WebhookEvent::classify(body.to_string().as_bytes()).is_err());
}

#[test]
fn transcription_ready_without_url_is_an_error() {
    let body = json!({
        "type": "call.transcription_ready",
        "call_cid": "default:m-7",
    });

    let result = WebhookEvent::classify(body.to_string().as_bytes());
    assert!(matches!(
        result,
        Err(EventParseError::MalformedEvent { .. })
    ));
}

#[test]
fn recording_ready_with_single_segment_cid_is_an_error() {
    let body = json!({
        "type": "call.recording_ready",
        "call_cid": "default",
        "call_recording": { "url": "https://example.com/r.mp4" },
    });

    assert!(WebhookEvent::classify(body.to_string().as_bytes()).is_err());
}
