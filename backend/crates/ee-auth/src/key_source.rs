use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey};

/// A decoding key together with the algorithm it must be used with
#[derive(Clone)]
pub struct VerificationKey {
    pub key: DecodingKey,
    pub algorithm: Algorithm,
}

/// Supplies provider signing keys to the credential verifier.
///
/// Failures to reach the key material are `ProviderUnavailable`; an unknown
/// key id is `InvalidToken`.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn verification_key(&self, kid: Option<&str>) -> AuthErrorResult<VerificationKey>;
}

/// Fixed key, used for local emulators and tests
pub struct StaticKeySource {
    key: VerificationKey,
    kid: Option<String>,
}

impl StaticKeySource {
    pub fn new(key: DecodingKey, algorithm: Algorithm) -> Self {
        Self {
            key: VerificationKey { key, algorithm },
            kid: None,
        }
    }

    /// Shared-secret key (HS384, so it never collides with session tokens)
    pub fn from_secret(secret: &[u8]) -> Self {
        Self::new(DecodingKey::from_secret(secret), Algorithm::HS384)
    }

    /// Only accept tokens carrying this key id
    pub fn with_kid(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn verification_key(&self, kid: Option<&str>) -> AuthErrorResult<VerificationKey> {
        match (&self.kid, kid) {
            (Some(expected), Some(actual)) if expected != actual => Err(AuthError::InvalidToken {
                message: format!("unknown key id: {}", actual),
                location: ErrorLocation::from(Location::caller()),
            }),
            (Some(_), None) => Err(AuthError::InvalidToken {
                message: "token header has no key id".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            _ => Ok(self.key.clone()),
        }
    }
}
