use ee_core::Booking;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BookingDto {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            event_id: b.event_id,
            created_at: b.created_at,
        }
    }
}
