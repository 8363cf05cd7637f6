use ee_core::EventDetails;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Body of both create and update; update replaces every field
#[derive(Debug, Deserialize)]
pub struct EventRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
}

impl From<EventRequest> for EventDetails {
    fn from(req: EventRequest) -> Self {
        Self {
            title: req.title.trim().to_string(),
            description: req.description,
            date: req.date,
            location: req.location,
        }
    }
}
