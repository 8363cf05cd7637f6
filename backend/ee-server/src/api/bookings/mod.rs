pub mod attendee_dto;
pub mod booking_dto;
pub mod booking_request;
#[allow(clippy::module_inception)]
pub mod bookings;
pub mod my_booking_dto;
