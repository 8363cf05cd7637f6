use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_JWKS_CACHE_TTL_SECS, DEFAULT_JWKS_URL,
    DEFAULT_PROVIDER_CREDENTIALS_FILENAME, DEFAULT_SESSION_ISSUER, DEFAULT_SESSION_TTL_SECS,
    MAX_SESSION_TTL_SECS, MIN_SESSION_SECRET_LENGTH, MIN_SESSION_TTL_SECS,
};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret for locally-issued session tokens
    pub session_secret: Option<String>,
    pub session_ttl_secs: u64,
    pub session_issuer: String,
    /// Provider service-credential JSON, relative to the config directory.
    /// A missing file leaves the provider unconfigured.
    pub provider_credentials_path: String,
    pub jwks_url: String,
    pub jwks_cache_ttl_secs: u64,
    /// Substitute the development identity when the provider is unavailable.
    /// Never enable in production.
    pub dev_fallback: bool,
    /// Attach a provider identity to an existing user found by email
    pub link_accounts_by_email: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            session_issuer: String::from(DEFAULT_SESSION_ISSUER),
            provider_credentials_path: String::from(DEFAULT_PROVIDER_CREDENTIALS_FILENAME),
            jwks_url: String::from(DEFAULT_JWKS_URL),
            jwks_cache_ttl_secs: DEFAULT_JWKS_CACHE_TTL_SECS,
            dev_fallback: false,
            link_accounts_by_email: false,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match &self.session_secret {
            None => {
                return Err(ConfigError::missing(
                    "auth.session_secret",
                    "EE_AUTH_SESSION_SECRET",
                ));
            }
            Some(secret) if secret.len() < MIN_SESSION_SECRET_LENGTH => {
                return Err(ConfigError::invalid(
                    "auth.session_secret",
                    format!("must be at least {} characters", MIN_SESSION_SECRET_LENGTH),
                ));
            }
            Some(_) => {}
        }

        if !(MIN_SESSION_TTL_SECS..=MAX_SESSION_TTL_SECS).contains(&self.session_ttl_secs) {
            return Err(ConfigError::invalid(
                "auth.session_ttl_secs",
                format!(
                    "must be {}-{}, got {}",
                    MIN_SESSION_TTL_SECS, MAX_SESSION_TTL_SECS, self.session_ttl_secs
                ),
            ));
        }

        if self.session_issuer.trim().is_empty() {
            return Err(ConfigError::invalid("auth.session_issuer", "cannot be empty"));
        }

        let credentials_path = Path::new(&self.provider_credentials_path);
        if credentials_path.is_absolute() || self.provider_credentials_path.contains("..") {
            return Err(ConfigError::invalid(
                "auth.provider_credentials_path",
                "must be relative and cannot contain '..'",
            ));
        }

        if !self.jwks_url.starts_with("https://") && !self.jwks_url.starts_with("http://") {
            return Err(ConfigError::invalid(
                "auth.jwks_url",
                format!("must be an http(s) URL, got {}", self.jwks_url),
            ));
        }

        if self.jwks_cache_ttl_secs == 0 {
            return Err(ConfigError::invalid("auth.jwks_cache_ttl_secs", "must be > 0"));
        }

        Ok(())
    }

    /// Session secret bytes; empty until validated
    pub fn session_secret_bytes(&self) -> &[u8] {
        self.session_secret.as_deref().unwrap_or_default().as_bytes()
    }
}
