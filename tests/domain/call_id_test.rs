use parley::domain::{CallIdParseError, CompositeCallId};

#[test]
fn parses_type_and_meeting_id() {
    let cid: CompositeCallId = "default:7d1e69f0-2f9a-4e5a-9c8a-1f0f0a1b2c3d"
        .parse()
        .unwrap();
    assert_eq!(cid.call_type, "default");
    assert_eq!(cid.meeting_id, "7d1e69f0-2f9a-4e5a-9c8a-1f0f0a1b2c3d");
}

#[test]
fn keeps_only_the_second_segment_when_extra_colons_appear() {
    let cid: CompositeCallId = "default:abc:extra".parse().unwrap();
    assert_eq!(cid.meeting_id, "abc");
}

#[test]
fn rejects_value_without_separator() {
    let result = "default".parse::<CompositeCallId>();
    assert_eq!(
        result,
        Err(CallIdParseError::MissingMeetingId("default".to_string()))
    );
}

#[test]
fn rejects_empty_meeting_segment() {
    assert!("default:".parse::<CompositeCallId>().is_err());
}

#[test]
fn rejects_empty_type_segment() {
    assert!(":abc".parse::<CompositeCallId>().is_err());
}

#[test]
fn round_trips_through_display() {
    let cid: CompositeCallId = "default:abc".parse().unwrap();
    assert_eq!(cid.to_string(), "default:abc");
}
