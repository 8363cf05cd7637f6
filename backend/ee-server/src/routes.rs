use crate::{
    AppState, cancel_rsvp, create_event, delete_event, exchange_token, get_event, health,
    list_attendees, list_events, list_my_rsvps, login, me, register, rsvp, update_event,
};

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/token", post(exchange_token))
        // Events
        .route("/events/create", post(create_event))
        .route("/events/all", get(list_events))
        .route("/events/{id}", get(get_event))
        .route("/events/update/{id}", put(update_event))
        .route("/events/delete/{id}", delete(delete_event))
        // Bookings
        .route("/bookings/rsvp", post(rsvp))
        .route("/bookings/cancel", delete(cancel_rsvp))
        .route("/bookings/event/{event_id}", get(list_attendees))
        .route("/bookings/me", get(list_my_rsvps))
        // Add shared state
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
