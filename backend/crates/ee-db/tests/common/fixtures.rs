use ee_core::EventDetails;

use chrono::{Duration, TimeZone, Utc};

/// Event details a week after a fixed base date
pub fn create_test_event_details(title: &str) -> EventDetails {
    EventDetails {
        title: title.to_string(),
        description: Some("Test event description".to_string()),
        date: Utc.with_ymd_and_hms(2026, 6, 1, 18, 30, 0).unwrap() + Duration::days(7),
        location: Some("Main hall".to_string()),
    }
}
