use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Raw payload of a provider-issued identity token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderClaims {
    /// Stable external subject identifier
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ProviderClaims {
    /// Checks claims the signature check cannot cover
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.trim().is_empty() {
            return Err(AuthError::InvalidToken {
                message: "sub cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.sub.len() > 128 {
            return Err(AuthError::InvalidToken {
                message: "sub exceeds maximum length".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

/// Decoded identity claims handed to the identity resolver. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaims {
    pub external_identity_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub expiry: DateTime<Utc>,
}

impl VerifiedClaims {
    #[track_caller]
    pub fn from_provider(claims: ProviderClaims) -> AuthErrorResult<Self> {
        claims.validate()?;

        let expiry =
            DateTime::from_timestamp(claims.exp, 0).ok_or_else(|| AuthError::InvalidToken {
                message: format!("exp out of range: {}", claims.exp),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            external_identity_id: claims.sub,
            email: claims.email.filter(|e| !e.trim().is_empty()),
            display_name: claims.name.filter(|n| !n.trim().is_empty()),
            expiry,
        })
    }
}
