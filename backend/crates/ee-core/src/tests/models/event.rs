use crate::{CoreError, Event, EventDetails, MAX_TITLE_LENGTH};

use chrono::{TimeZone, Utc};

fn details(title: &str) -> EventDetails {
    EventDetails {
        title: title.to_string(),
        description: Some("Bring snacks".to_string()),
        date: Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap(),
        location: Some("Hall A".to_string()),
    }
}

#[test]
fn test_event_is_organized_by() {
    let event = Event {
        id: 1,
        title: "Meetup".to_string(),
        description: None,
        date: Utc::now(),
        location: None,
        organizer_id: 42,
    };

    assert!(event.is_organized_by(42));
    assert!(!event.is_organized_by(43));
}

#[test]
fn test_event_apply_replaces_all_editable_fields() {
    let mut event = Event {
        id: 1,
        title: "Old".to_string(),
        description: Some("old".to_string()),
        date: Utc::now(),
        location: Some("Old hall".to_string()),
        organizer_id: 42,
    };
    let update = EventDetails {
        description: None,
        location: None,
        ..details("New")
    };

    event.apply(update.clone());

    assert_eq!(event.title, "New");
    assert_eq!(event.description, None);
    assert_eq!(event.location, None);
    assert_eq!(event.date, update.date);
    assert_eq!(event.organizer_id, 42);
}

#[test]
fn test_event_details_valid() {
    assert!(details("Rust meetup").validate().is_ok());
}

#[test]
fn test_event_details_blank_title_rejected() {
    let result = details("   ").validate();

    match result {
        Err(CoreError::Validation { field, .. }) => assert_eq!(field.as_deref(), Some("title")),
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test]
fn test_event_details_title_too_long_rejected() {
    let title = "x".repeat(MAX_TITLE_LENGTH + 1);
    assert!(details(&title).validate().is_err());
}
