use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use error_location::ErrorLocation;

/// Salted argon2 hash in PHC string form
#[track_caller]
pub fn hash_password(password: &str) -> AuthErrorResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Checks `password` against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; an unparseable stored hash is an error.
#[track_caller]
pub fn verify_password(password: &str, stored_hash: &str) -> AuthErrorResult<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::PasswordHash {
        message: format!("stored hash is not a valid PHC string: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswordHash {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
