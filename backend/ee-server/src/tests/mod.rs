mod api;
mod identity;

use ee_auth::{SessionTokenIssuer, VerifiedClaims};

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use sqlx::SqlitePool;

pub(crate) const SESSION_SECRET: &[u8] = b"server-unit-test-secret-at-least-32-bytes";

pub(crate) async fn create_test_pool() -> SqlitePool {
    ee_db::connect_in_memory()
        .await
        .expect("Failed to create test database")
}

pub(crate) fn session_issuer() -> Arc<SessionTokenIssuer> {
    Arc::new(SessionTokenIssuer::new(
        SESSION_SECRET,
        "eventease",
        Duration::from_secs(3600),
    ))
}

pub(crate) fn verified_claims(
    external_id: &str,
    email: Option<&str>,
    name: Option<&str>,
) -> VerifiedClaims {
    VerifiedClaims {
        external_identity_id: external_id.to_string(),
        email: email.map(str::to_string),
        display_name: name.map(str::to_string),
        expiry: Utc::now() + TimeDelta::hours(1),
    }
}
