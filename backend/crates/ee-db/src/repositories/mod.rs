pub mod booking_repository;
pub mod event_repository;
pub mod user_repository;

use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;

/// Convert a stored unix timestamp back into a UTC datetime
#[track_caller]
pub(crate) fn timestamp_to_datetime(ts: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0).ok_or_else(|| DbError::CorruptRow {
        message: format!("{} holds out-of-range timestamp {}", column, ts),
        location: ErrorLocation::from(Location::caller()),
    })
}
