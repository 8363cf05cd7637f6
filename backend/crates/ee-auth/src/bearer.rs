use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

const BEARER_PREFIX: &str = "Bearer ";

/// Pulls the token out of an `Authorization: Bearer <token>` header value
#[track_caller]
pub fn extract_bearer(header: Option<&str>) -> AuthErrorResult<&str> {
    let value = header.ok_or_else(|| AuthError::MissingHeader {
        location: ErrorLocation::from(Location::caller()),
    })?;

    let scheme_matches = value
        .get(..BEARER_PREFIX.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(BEARER_PREFIX));
    if !scheme_matches {
        return Err(AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let token = value[BEARER_PREFIX.len()..].trim();
    if token.is_empty() {
        return Err(AuthError::InvalidToken {
            message: "empty bearer token".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(token)
}
