//! User entity - a local account, created either by password registration
//! or on first sight of a provider-verified identity.

use crate::{ResolvedIdentity, normalize_email};

use serde::{Deserialize, Serialize};

/// Display name given to provider users whose token carries no name
pub const PLACEHOLDER_NAME: &str = "No Name";
/// Domain used to synthesize an email for provider users without one
pub const PLACEHOLDER_EMAIL_DOMAIN: &str = "users.placeholder.invalid";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Unique across all users
    pub email: String,
    /// Argon2 PHC string; None for provider-authenticated users
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Provider subject id; None for password-only users
    pub external_identity_id: Option<String>,
}

impl User {
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn is_provider_linked(&self) -> bool {
        self.external_identity_id.is_some()
    }

    /// The view of this user handed to request handlers
    pub fn to_identity(&self) -> ResolvedIdentity {
        ResolvedIdentity {
            id: self.id,
            external_identity_id: self.external_identity_id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

impl From<User> for ResolvedIdentity {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            external_identity_id: user.external_identity_id,
            email: user.email,
            name: user.name,
        }
    }
}

/// A user row that has not been inserted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub external_identity_id: Option<String>,
}

impl NewUser {
    /// Password-bearing user for the local credential path
    pub fn with_password(name: String, email: String, password_hash: String) -> Self {
        Self {
            name,
            email,
            password_hash: Some(password_hash),
            external_identity_id: None,
        }
    }

    /// Provider user, filling in placeholders for missing name and email
    pub fn from_provider(
        external_identity_id: String,
        email: Option<String>,
        display_name: Option<String>,
    ) -> Self {
        // Stored emails are always in canonical form, placeholders included
        let email = normalize_email(
            &email
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| format!("{}@{}", external_identity_id, PLACEHOLDER_EMAIL_DOMAIN)),
        );
        let name = display_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_NAME.to_string());

        Self {
            name,
            email,
            password_hash: None,
            external_identity_id: Some(external_identity_id),
        }
    }
}
