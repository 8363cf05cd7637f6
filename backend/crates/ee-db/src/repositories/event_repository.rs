use crate::repositories::timestamp_to_datetime;
use crate::Result as DbErrorResult;

use ee_core::{Event, EventDetails};

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct EventRow {
    id: i64,
    title: String,
    description: Option<String>,
    date: i64,
    location: Option<String>,
    organizer_id: i64,
}

impl EventRow {
    fn into_event(self) -> DbErrorResult<Event> {
        Ok(Event {
            id: self.id,
            title: self.title,
            description: self.description,
            date: timestamp_to_datetime(self.date, "events.date")?,
            location: self.location,
            organizer_id: self.organizer_id,
        })
    }
}

pub struct EventRepository {
    pool: SqlitePool,
}

impl EventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, details: &EventDetails, organizer_id: i64) -> DbErrorResult<Event> {
        let now = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                INSERT INTO events (
                    title, description, date, location, organizer_id, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&details.title)
        .bind(&details.description)
        .bind(details.date.timestamp())
        .bind(&details.location)
        .bind(organizer_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Event {
            id: result.last_insert_rowid(),
            title: details.title.clone(),
            description: details.description.clone(),
            // Stored with second precision; return what a later read returns
            date: timestamp_to_datetime(details.date.timestamp(), "events.date")?,
            location: details.location.clone(),
            organizer_id,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
                SELECT id, title, description, date, location, organizer_id
                FROM events
                WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(EventRow::into_event).transpose()
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
                SELECT id, title, description, date, location, organizer_id
                FROM events
                ORDER BY date, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EventRow::into_event).collect()
    }

    /// Persist the editable fields of an event. Returns false if it no longer exists.
    pub async fn update(&self, event: &Event) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE events
                SET title = ?, description = ?, date = ?, location = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date.timestamp())
        .bind(&event.location)
        .bind(Utc::now().timestamp())
        .bind(event.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an event; its bookings are removed by the foreign key cascade
    pub async fn delete(&self, id: i64) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
