use ee_auth::SessionToken;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// RFC 3339
    pub expires_at: String,
}

impl From<SessionToken> for TokenResponse {
    fn from(t: SessionToken) -> Self {
        Self {
            access_token: t.access_token,
            token_type: t.token_type,
            expires_at: t.expires_at.to_rfc3339(),
        }
    }
}
