use crate::{AuthError, Result as AuthErrorResult, SessionClaims, SessionToken};

use ee_core::ResolvedIdentity;

use std::panic::Location;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

/// Mints HS256 session tokens for resolved identities
pub struct SessionTokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    ttl: Duration,
}

impl SessionTokenIssuer {
    pub fn new(secret: &[u8], issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[track_caller]
    pub fn issue(&self, identity: &ResolvedIdentity) -> AuthErrorResult<SessionToken> {
        self.issue_at(identity, Utc::now())
    }

    /// Mint a token as if the current time were `now`
    #[track_caller]
    pub fn issue_at(
        &self,
        identity: &ResolvedIdentity,
        now: DateTime<Utc>,
    ) -> AuthErrorResult<SessionToken> {
        let ttl = TimeDelta::from_std(self.ttl).map_err(|e| AuthError::InvalidClaim {
            claim: "exp".to_string(),
            message: format!("session lifetime out of range: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        let expires_at = now + ttl;

        let claims = SessionClaims {
            sub: identity.id.to_string(),
            email: identity.email.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenSigning {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(SessionToken::bearer(access_token, expires_at))
    }
}
