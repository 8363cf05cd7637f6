//! Input checks shared by the HTTP handlers.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[track_caller]
pub fn validate_name(name: &str) -> CoreErrorResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(validation_error("name cannot be empty", "name"));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(validation_error(
            format!("name exceeds {} characters", MAX_NAME_LENGTH),
            "name",
        ));
    }
    Ok(())
}

/// Shape check only: one '@' with something on both sides
#[track_caller]
pub fn validate_email(email: &str) -> CoreErrorResult<()> {
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(validation_error(
            format!("email exceeds {} characters", MAX_EMAIL_LENGTH),
            "email",
        ));
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace) =>
        {
            Ok(())
        }
        _ => Err(validation_error("email is not a valid address", "email")),
    }
}

#[track_caller]
pub fn validate_password(password: &str) -> CoreErrorResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(validation_error(
            format!("password must be at least {} characters", MIN_PASSWORD_LENGTH),
            "password",
        ));
    }
    Ok(())
}

#[track_caller]
fn validation_error(message: impl Into<String>, field: &str) -> CoreError {
    CoreError::Validation {
        message: message.into(),
        field: Some(field.to_string()),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Canonical form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
