pub mod event_dto;
pub mod event_request;
#[allow(clippy::module_inception)]
pub mod events;
