use crate::{
    AuthError, KeySource, ProviderClaims, Result as AuthErrorResult, ServiceCredentials,
    VerifiedClaims,
};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Validation, decode, decode_header};
use log::debug;

struct Provider {
    issuer: String,
    audience: String,
    keys: Arc<dyn KeySource>,
}

/// Validates identity tokens issued by the external provider.
///
/// Every token problem (signature, expiry, issuer, audience, shape) is
/// reported as `InvalidToken`. Only a missing or unreachable provider is
/// `ProviderUnavailable`.
pub struct CredentialVerifier {
    provider: Option<Provider>,
}

impl CredentialVerifier {
    pub fn new(credentials: &ServiceCredentials, keys: Arc<dyn KeySource>) -> Self {
        Self::with_issuer(credentials.issuer(), credentials.audience(), keys)
    }

    pub fn with_issuer(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        keys: Arc<dyn KeySource>,
    ) -> Self {
        Self {
            provider: Some(Provider {
                issuer: issuer.into(),
                audience: audience.into(),
                keys,
            }),
        }
    }

    /// Verifier with no provider configured; every call fails with `ProviderUnavailable`
    pub fn unavailable() -> Self {
        Self { provider: None }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn verify(&self, token: &str) -> AuthErrorResult<VerifiedClaims> {
        let Some(provider) = &self.provider else {
            return Err(AuthError::ProviderUnavailable {
                message: "no identity provider configured".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let header = decode_header(token).map_err(invalid_token)?;
        let key = provider.keys.verification_key(header.kid.as_deref()).await?;

        if header.alg != key.algorithm {
            return Err(AuthError::InvalidToken {
                message: format!(
                    "algorithm {:?} does not match signing key ({:?})",
                    header.alg, key.algorithm
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut validation = Validation::new(key.algorithm);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 30;
        validation.set_issuer(&[provider.issuer.as_str()]);
        validation.set_audience(&[provider.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        let token_data =
            decode::<ProviderClaims>(token, &key.key, &validation).map_err(invalid_token)?;

        let claims = VerifiedClaims::from_provider(token_data.claims)?;
        debug!("Verified provider token for {}", claims.external_identity_id);

        Ok(claims)
    }
}

#[track_caller]
fn invalid_token(e: jsonwebtoken::errors::Error) -> AuthError {
    let message = match e.kind() {
        ErrorKind::ExpiredSignature => "token expired".to_string(),
        ErrorKind::InvalidIssuer => "unexpected issuer".to_string(),
        ErrorKind::InvalidAudience => "unexpected audience".to_string(),
        _ => e.to_string(),
    };

    AuthError::InvalidToken {
        message,
        location: ErrorLocation::from(Location::caller()),
    }
}
