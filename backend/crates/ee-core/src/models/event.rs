//! Event entity - something users can RSVP to.

use crate::{CoreError, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, Result as CoreErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    /// User who created the event; the only one allowed to change it
    pub organizer_id: i64,
}

impl Event {
    pub fn is_organized_by(&self, user_id: i64) -> bool {
        self.organizer_id == user_id
    }

    /// Replace every editable field with the given details
    pub fn apply(&mut self, details: EventDetails) {
        self.title = details.title;
        self.description = details.description;
        self.date = details.date;
        self.location = details.location;
    }
}

/// The editable part of an event, used for both create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
}

impl EventDetails {
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation {
                message: "title cannot be empty".to_string(),
                field: Some("title".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(CoreError::Validation {
                message: format!("title exceeds {} characters", MAX_TITLE_LENGTH),
                field: Some("title".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if let Some(ref description) = self.description
            && description.chars().count() > MAX_DESCRIPTION_LENGTH
        {
            return Err(CoreError::Validation {
                message: format!("description exceeds {} characters", MAX_DESCRIPTION_LENGTH),
                field: Some("description".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
