use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An RSVP of one user to one event. Unique per (user_id, event_id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A booking together with the user who made it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWithUser {
    pub booking: Booking,
    pub user: crate::User,
}

/// A booking together with the event it is for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWithEvent {
    pub booking: Booking,
    pub event: crate::Event,
}
