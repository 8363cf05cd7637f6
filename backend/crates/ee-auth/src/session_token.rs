use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TOKEN_TYPE: &str = "bearer";

/// A minted session token as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    pub fn bearer(access_token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_at,
        }
    }
}
