pub mod booking;
pub mod event;
pub mod resolved_identity;
pub mod user;
