use crate::EventDto;

use ee_core::BookingWithEvent;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One of the caller's bookings with the event inlined
#[derive(Debug, Serialize)]
pub struct MyBookingDto {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub created_at: DateTime<Utc>,
    pub event: EventDto,
}

impl From<BookingWithEvent> for MyBookingDto {
    fn from(row: BookingWithEvent) -> Self {
        let BookingWithEvent { booking, event } = row;
        Self {
            id: booking.id,
            user_id: booking.user_id,
            event_id: booking.event_id,
            created_at: booking.created_at,
            event: event.into(),
        }
    }
}
