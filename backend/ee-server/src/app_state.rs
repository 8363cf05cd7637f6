use crate::error::Result as ServerErrorResult;
use crate::{CredentialStore, IdentityResolver};

use ee_auth::{CredentialVerifier, SessionTokenIssuer, SessionValidator};
use ee_config::AuthConfig;
use ee_core::{DEV_USER_EMAIL, DEV_USER_ID, DEV_USER_NAME};
use ee_db::UserRepository;

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use sqlx::SqlitePool;

/// Everything a request handler needs, built once at start-up
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub verifier: Arc<CredentialVerifier>,
    pub session_issuer: Arc<SessionTokenIssuer>,
    pub session_validator: Arc<SessionValidator>,
    /// Use the development identity when the provider is unavailable
    pub dev_fallback: bool,
    pub link_accounts_by_email: bool,
}

impl AppState {
    pub fn new(pool: SqlitePool, verifier: CredentialVerifier, auth: &AuthConfig) -> Self {
        let secret = auth.session_secret_bytes();
        let ttl = Duration::from_secs(auth.session_ttl_secs);

        Self {
            pool,
            verifier: Arc::new(verifier),
            session_issuer: Arc::new(SessionTokenIssuer::new(
                secret,
                auth.session_issuer.clone(),
                ttl,
            )),
            session_validator: Arc::new(SessionValidator::new(secret, &auth.session_issuer)),
            dev_fallback: auth.dev_fallback,
            link_accounts_by_email: auth.link_accounts_by_email,
        }
    }

    pub fn identity_resolver(&self) -> IdentityResolver {
        IdentityResolver::new(self.pool.clone(), self.link_accounts_by_email)
    }

    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::new(self.pool.clone(), self.session_issuer.clone())
    }

    /// Make sure the development identity has a backing row so that events
    /// and bookings created under it satisfy foreign keys
    pub async fn ensure_development_user(&self) -> ServerErrorResult<()> {
        if !self.dev_fallback {
            return Ok(());
        }

        warn!(
            "auth.dev_fallback is ON: requests run as the development user while the identity provider is unavailable"
        );

        let users = UserRepository::new(self.pool.clone());
        if users
            .ensure_with_id(DEV_USER_ID, DEV_USER_NAME, DEV_USER_EMAIL)
            .await?
        {
            info!("Created development user {} ({})", DEV_USER_NAME, DEV_USER_ID);
        } else if let Some(existing) = users.find_by_id(DEV_USER_ID).await?
            && existing.email != DEV_USER_EMAIL
        {
            warn!(
                "User {} is {}, not the development user; fallback requests will act as them",
                DEV_USER_ID, existing.email
            );
        }

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
