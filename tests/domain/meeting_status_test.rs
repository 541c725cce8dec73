use parley::domain::MeetingStatus;

#[test]
fn round_trips_every_status() {
    let statuses = [
        MeetingStatus::Upcoming,
        MeetingStatus::Active,
        MeetingStatus::Processing,
        MeetingStatus::Completed,
        MeetingStatus::Cancelled,
    ];

    for status in statuses {
        assert_eq!(status.as_str().parse::<MeetingStatus>().unwrap(), status);
    }
}

#[test]
fn rejects_unknown_status() {
    assert!("paused".parse::<MeetingStatus>().is_err());
}

#[test]
fn statuses_are_stored_lowercase() {
    assert_eq!(MeetingStatus::Upcoming.as_str(), "upcoming");
    assert_eq!(MeetingStatus::Processing.to_string(), "processing");
}
