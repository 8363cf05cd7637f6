use ee_core::{BookingWithUser, User};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A booking with the attending user inlined
#[derive(Debug, Serialize)]
pub struct AttendeeDto {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub created_at: DateTime<Utc>,
    pub user: AttendeeUserDto,
}

#[derive(Debug, Serialize)]
pub struct AttendeeUserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for AttendeeUserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

impl From<BookingWithUser> for AttendeeDto {
    fn from(row: BookingWithUser) -> Self {
        let BookingWithUser { booking, user } = row;
        Self {
            id: booking.id,
            user_id: booking.user_id,
            event_id: booking.event_id,
            created_at: booking.created_at,
            user: user.into(),
        }
    }
}
