//! Booking (RSVP) REST API handlers
//!
//! Every handler acts as the caller's resolved identity.

use crate::api::events::events::find_event;
use crate::{
    ApiError, ApiResult, AppState, AttendeeDto, BookingDto, BookingRequest, CurrentUser,
    MessageResponse, MyBookingDto,
};

use ee_db::{BookingRepository, EventRepository};

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use error_location::ErrorLocation;

const ALREADY_RSVPD: &str = "You have already RSVP'd to this event";

// =============================================================================
// Handlers
// =============================================================================

/// POST /bookings/rsvp
pub async fn rsvp(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BookingDto>)> {
    let Json(req) = payload?;

    let events = EventRepository::new(state.pool.clone());
    let event = find_event(&events, req.event_id).await?;

    let bookings = BookingRepository::new(state.pool.clone());
    if bookings.find(identity.id, event.id).await?.is_some() {
        return Err(already_rsvpd());
    }

    // The unique (user_id, event_id) index settles concurrent RSVPs
    let booking = match bookings.create(identity.id, event.id).await {
        Ok(booking) => booking,
        Err(e) if e.is_unique_violation() => return Err(already_rsvpd()),
        Err(e) => return Err(e.into()),
    };

    log::info!("User {} RSVP'd to event {}", identity.id, event.id);
    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// DELETE /bookings/cancel
pub async fn cancel_rsvp(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(req) = payload?;

    let bookings = BookingRepository::new(state.pool.clone());
    if !bookings.delete(identity.id, req.event_id).await? {
        return Err(ApiError::NotFound {
            message: "RSVP not found".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    log::info!("User {} cancelled RSVP to event {}", identity.id, req.event_id);
    Ok(Json(MessageResponse::new("RSVP cancelled successfully")))
}

/// GET /bookings/event/{event_id}
///
/// Visible to any authenticated user.
pub async fn list_attendees(
    State(state): State<AppState>,
    CurrentUser(_identity): CurrentUser,
    Path(event_id): Path<i64>,
) -> ApiResult<Json<Vec<AttendeeDto>>> {
    let events = EventRepository::new(state.pool.clone());
    let event = find_event(&events, event_id).await?;

    let bookings = BookingRepository::new(state.pool.clone());
    let attendees = bookings.find_attendees(event.id).await?;

    Ok(Json(attendees.into_iter().map(AttendeeDto::from).collect()))
}

/// GET /bookings/me
pub async fn list_my_rsvps(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> ApiResult<Json<Vec<MyBookingDto>>> {
    let bookings = BookingRepository::new(state.pool.clone());
    let mine = bookings.find_by_user(identity.id).await?;

    Ok(Json(mine.into_iter().map(MyBookingDto::from).collect()))
}

#[track_caller]
fn already_rsvpd() -> ApiError {
    ApiError::BadRequest {
        message: ALREADY_RSVPD.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
