use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;
use std::path::Path;

use error_location::ErrorLocation;
use serde::Deserialize;

/// Issuer URL prefix; the provider project id is appended
pub const PROVIDER_ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// The parts of the provider's service-credential file the verifier needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCredentials {
    pub project_id: String,
    #[serde(default)]
    pub client_email: Option<String>,
}

impl ServiceCredentials {
    /// Loads the credential file. A missing file yields `Ok(None)`.
    #[track_caller]
    pub fn load(path: &Path) -> AuthErrorResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).map_err(|e| AuthError::ProviderConfig {
            message: format!("Failed to read {}: {}", path.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Self::from_json(&contents).map(Some)
    }

    #[track_caller]
    pub fn from_json(contents: &str) -> AuthErrorResult<Self> {
        let credentials: Self =
            serde_json::from_str(contents).map_err(|e| AuthError::ProviderConfig {
                message: format!("Invalid service credentials: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if credentials.project_id.trim().is_empty() {
            return Err(AuthError::ProviderConfig {
                message: "project_id cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(credentials)
    }

    pub fn issuer(&self) -> String {
        format!("{}{}", PROVIDER_ISSUER_PREFIX, self.project_id)
    }

    pub fn audience(&self) -> &str {
        &self.project_id
    }
}
