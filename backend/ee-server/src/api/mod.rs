pub mod auth;
pub mod bookings;
pub mod error;
pub mod events;
pub mod extractors;
pub mod message_response;
