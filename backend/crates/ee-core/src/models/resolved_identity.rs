use serde::{Deserialize, Serialize};

/// Id of the fixed development identity
pub const DEV_USER_ID: i64 = 1;
/// Marker email of the fixed development identity
pub const DEV_USER_EMAIL: &str = "dev@eventease.local";
/// Display name of the fixed development identity
pub const DEV_USER_NAME: &str = "Developer";

/// The local user a request is acting as.
///
/// Built fresh for every request by the identity extractor; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIdentity {
    pub id: i64,
    pub external_identity_id: Option<String>,
    pub email: String,
    pub name: String,
}

impl ResolvedIdentity {
    /// Placeholder identity used only when development fallback is enabled
    pub fn development() -> Self {
        Self {
            id: DEV_USER_ID,
            external_identity_id: None,
            email: DEV_USER_EMAIL.to_string(),
            name: DEV_USER_NAME.to_string(),
        }
    }
}
