//! Event REST API handlers
//!
//! Listing and reading are public. Creating requires an identity, and only
//! the organizer may update or delete.

use crate::{ApiError, ApiResult, AppState, CurrentUser, EventDto, EventRequest, MessageResponse};

use ee_core::{Event, EventDetails};
use ee_db::EventRepository;

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use error_location::ErrorLocation;

// =============================================================================
// Handlers
// =============================================================================

/// POST /events/create
pub async fn create_event(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EventDto>)> {
    let Json(req) = payload?;
    let details = EventDetails::from(req);
    details.validate()?;

    let repo = EventRepository::new(state.pool.clone());
    let event = repo.create(&details, identity.id).await?;

    log::info!(
        "User {} created event {} '{}'",
        identity.id,
        event.id,
        event.title
    );

    Ok((StatusCode::CREATED, Json(event.into())))
}

/// GET /events/all
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<EventDto>>> {
    let repo = EventRepository::new(state.pool.clone());
    let events = repo.find_all().await?;

    Ok(Json(events.into_iter().map(EventDto::from).collect()))
}

/// GET /events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<EventDto>> {
    let repo = EventRepository::new(state.pool.clone());
    let event = find_event(&repo, id).await?;

    Ok(Json(event.into()))
}

/// PUT /events/update/{id}
///
/// Ownership is checked before the body is looked at, so a non-organizer
/// always gets 403.
pub async fn update_event(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<i64>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> ApiResult<Json<EventDto>> {
    let repo = EventRepository::new(state.pool.clone());
    let mut event = find_event(&repo, id).await?;
    ensure_organizer(&event, identity.id)?;

    let Json(req) = payload?;
    let details = EventDetails::from(req);
    details.validate()?;
    event.apply(details);

    if !repo.update(&event).await? {
        // Deleted between the read and the write
        return Err(event_not_found());
    }

    // Respond with the stored row; the date is kept at second precision
    let stored = find_event(&repo, id).await?;

    log::info!("User {} updated event {}", identity.id, stored.id);
    Ok(Json(stored.into()))
}

/// DELETE /events/delete/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let repo = EventRepository::new(state.pool.clone());
    let event = find_event(&repo, id).await?;
    ensure_organizer(&event, identity.id)?;

    if !repo.delete(event.id).await? {
        return Err(event_not_found());
    }

    log::info!("User {} deleted event {}", identity.id, event.id);
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

// =============================================================================
// Helpers
// =============================================================================

pub(crate) async fn find_event(repo: &EventRepository, id: i64) -> ApiResult<Event> {
    repo.find_by_id(id).await?.ok_or_else(event_not_found)
}

#[track_caller]
pub(crate) fn event_not_found() -> ApiError {
    ApiError::NotFound {
        message: "Event not found".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn ensure_organizer(event: &Event, user_id: i64) -> ApiResult<()> {
    if event.is_organized_by(user_id) {
        return Ok(());
    }

    Err(ApiError::NotAuthorized {
        message: "Not authorized".to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}
