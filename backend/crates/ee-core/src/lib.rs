pub mod error;
pub mod models;
pub mod validation;

pub use error::{CoreError, Result};
pub use models::booking::{Booking, BookingWithEvent, BookingWithUser};
pub use models::event::{Event, EventDetails};
pub use models::resolved_identity::{
    DEV_USER_EMAIL, DEV_USER_ID, DEV_USER_NAME, ResolvedIdentity,
};
pub use models::user::{NewUser, PLACEHOLDER_EMAIL_DOMAIN, PLACEHOLDER_NAME, User};
pub use validation::{
    MAX_DESCRIPTION_LENGTH, MAX_EMAIL_LENGTH, MAX_NAME_LENGTH, MAX_TITLE_LENGTH,
    MIN_PASSWORD_LENGTH, normalize_email, validate_email, validate_name, validate_password,
};

#[cfg(test)]
mod tests;
