pub mod bearer;
pub mod claims;
pub mod credential_verifier;
pub mod error;
pub mod jwks_key_source;
pub mod key_source;
pub mod password;
pub mod provider_config;
pub mod session_claims;
pub mod session_issuer;
pub mod session_token;
pub mod session_validator;

pub use bearer::extract_bearer;
pub use claims::{ProviderClaims, VerifiedClaims};
pub use credential_verifier::CredentialVerifier;
pub use error::{AuthError, Result};
pub use jwks_key_source::{DEFAULT_JWKS_CACHE_TTL, JwksKeySource};
pub use key_source::{KeySource, StaticKeySource, VerificationKey};
pub use password::{hash_password, verify_password};
pub use provider_config::{PROVIDER_ISSUER_PREFIX, ServiceCredentials};
pub use session_claims::SessionClaims;
pub use session_issuer::SessionTokenIssuer;
pub use session_token::SessionToken;
pub use session_validator::SessionValidator;

#[cfg(test)]
mod tests;
