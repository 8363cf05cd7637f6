use crate::repositories::timestamp_to_datetime;
use crate::Result as DbErrorResult;

use ee_core::{Booking, BookingWithEvent, BookingWithUser, Event, User};

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct BookingRow {
    id: i64,
    user_id: i64,
    event_id: i64,
    created_at: i64,
}

impl BookingRow {
    fn into_booking(self) -> DbErrorResult<Booking> {
        Ok(Booking {
            id: self.id,
            user_id: self.user_id,
            event_id: self.event_id,
            created_at: timestamp_to_datetime(self.created_at, "bookings.created_at")?,
        })
    }
}

#[derive(FromRow)]
struct AttendeeRow {
    id: i64,
    user_id: i64,
    event_id: i64,
    created_at: i64,
    user_name: String,
    user_email: String,
    user_external_identity_id: Option<String>,
}

#[derive(FromRow)]
struct BookedEventRow {
    id: i64,
    user_id: i64,
    event_id: i64,
    created_at: i64,
    event_title: String,
    event_description: Option<String>,
    event_date: i64,
    event_location: Option<String>,
    event_organizer_id: i64,
}

pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record an RSVP. A second RSVP for the same pair is a `UniqueViolation`.
    pub async fn create(&self, user_id: i64, event_id: i64) -> DbErrorResult<Booking> {
        let created_at = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                INSERT INTO bookings (user_id, event_id, created_at)
                VALUES (?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Booking {
            id: result.last_insert_rowid(),
            user_id,
            event_id,
            created_at: timestamp_to_datetime(created_at, "bookings.created_at")?,
        })
    }

    pub async fn find(&self, user_id: i64, event_id: i64) -> DbErrorResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
                SELECT id, user_id, event_id, created_at
                FROM bookings
                WHERE user_id = ? AND event_id = ?
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(BookingRow::into_booking).transpose()
    }

    pub async fn delete(&self, user_id: i64, event_id: i64) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE user_id = ? AND event_id = ?")
            .bind(user_id)
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Everyone who RSVP'd to an event, oldest booking first
    pub async fn find_attendees(&self, event_id: i64) -> DbErrorResult<Vec<BookingWithUser>> {
        let rows = sqlx::query_as::<_, AttendeeRow>(
            r#"
                SELECT b.id, b.user_id, b.event_id, b.created_at,
                    u.name AS user_name, u.email AS user_email,
                    u.external_identity_id AS user_external_identity_id
                FROM bookings b
                JOIN users u ON u.id = b.user_id
                WHERE b.event_id = ?
                ORDER BY b.created_at, b.id
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| -> DbErrorResult<BookingWithUser> {
                Ok(BookingWithUser {
                    booking: Booking {
                        id: r.id,
                        user_id: r.user_id,
                        event_id: r.event_id,
                        created_at: timestamp_to_datetime(r.created_at, "bookings.created_at")?,
                    },
                    user: User {
                        id: r.user_id,
                        name: r.user_name,
                        email: r.user_email,
                        password_hash: None,
                        external_identity_id: r.user_external_identity_id,
                    },
                })
            })
            .collect()
    }

    /// Every RSVP a user holds, with the booked event
    pub async fn find_by_user(&self, user_id: i64) -> DbErrorResult<Vec<BookingWithEvent>> {
        let rows = sqlx::query_as::<_, BookedEventRow>(
            r#"
                SELECT b.id, b.user_id, b.event_id, b.created_at,
                    e.title AS event_title, e.description AS event_description,
                    e.date AS event_date, e.location AS event_location,
                    e.organizer_id AS event_organizer_id
                FROM bookings b
                JOIN events e ON e.id = b.event_id
                WHERE b.user_id = ?
                ORDER BY e.date, b.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| -> DbErrorResult<BookingWithEvent> {
                Ok(BookingWithEvent {
                    booking: Booking {
                        id: r.id,
                        user_id: r.user_id,
                        event_id: r.event_id,
                        created_at: timestamp_to_datetime(r.created_at, "bookings.created_at")?,
                    },
                    event: Event {
                        id: r.event_id,
                        title: r.event_title,
                        description: r.event_description,
                        date: timestamp_to_datetime(r.event_date, "events.date")?,
                        location: r.event_location,
                        organizer_id: r.event_organizer_id,
                    },
                })
            })
            .collect()
    }
}
