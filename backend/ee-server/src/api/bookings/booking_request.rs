use serde::Deserialize;

/// Body of both RSVP and cancel
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub event_id: i64,
}
