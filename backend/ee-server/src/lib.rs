pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod identity;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{exchange_token, login, me, register},
        login_request::LoginRequest,
        register_request::RegisterRequest,
        token_response::TokenResponse,
        user_out::UserOut,
    },
    bookings::{
        attendee_dto::{AttendeeDto, AttendeeUserDto},
        booking_dto::BookingDto,
        booking_request::BookingRequest,
        bookings::{cancel_rsvp, list_attendees, list_my_rsvps, rsvp},
        my_booking_dto::MyBookingDto,
    },
    error::ApiError,
    error::Result as ApiResult,
    events::{
        event_dto::EventDto,
        event_request::EventRequest,
        events::{create_event, delete_event, get_event, list_events, update_event},
    },
    extractors::{current_user::CurrentUser, provider_identity::ProviderIdentity},
    message_response::MessageResponse,
};
pub use app_state::AppState;
pub use identity::{
    credential_store::CredentialStore,
    error::{IdentityError, Result as IdentityResult},
    identity_resolver::IdentityResolver,
};
pub use routes::build_router;
