//! Password-based accounts, stored in the same `users` table as provider users.

use crate::{IdentityError, IdentityResult};

use ee_auth::{SessionToken, SessionTokenIssuer, hash_password, verify_password};
use ee_core::{NewUser, User, normalize_email};
use ee_db::UserRepository;

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, info};
use sqlx::SqlitePool;

pub struct CredentialStore {
    users: UserRepository,
    issuer: Arc<SessionTokenIssuer>,
}

impl CredentialStore {
    pub fn new(pool: SqlitePool, issuer: Arc<SessionTokenIssuer>) -> Self {
        Self {
            users: UserRepository::new(pool),
            issuer,
        }
    }

    /// Create a password-bearing user. The email's unique constraint decides
    /// concurrent registrations: exactly one wins.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> IdentityResult<User> {
        let email = normalize_email(email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(IdentityError::DuplicateEmail {
                email,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let password_hash = hash_password(password)?;
        let new_user = NewUser::with_password(name.trim().to_string(), email, password_hash);

        match self.users.create(&new_user).await {
            Ok(user) => {
                info!("Registered user {} ({})", user.id, user.email);
                Ok(user)
            }
            Err(e) if e.is_unique_violation() => Err(IdentityError::DuplicateEmail {
                email: new_user.email,
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Check a password and mint a session token for its owner
    pub async fn authenticate(&self, email: &str, password: &str) -> IdentityResult<SessionToken> {
        let email = normalize_email(email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| IdentityError::NotFound {
                email: email.clone(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        // Provider-created users have no password to check against
        let Some(stored_hash) = user.password_hash.as_deref() else {
            debug!("Password login attempted for provider-only user {}", user.id);
            return Err(IdentityError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if !verify_password(password, stored_hash)? {
            return Err(IdentityError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(self.issuer.issue(&user.to_identity())?)
    }
}
