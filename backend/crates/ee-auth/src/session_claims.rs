use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Payload of a locally-signed session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Local user id
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

impl SessionClaims {
    /// Validate claims after signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        self.user_id().map(|_| ())
    }

    /// The local user id carried in `sub`
    #[track_caller]
    pub fn user_id(&self) -> AuthErrorResult<i64> {
        match self.sub.parse::<i64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub must be a positive user id".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
