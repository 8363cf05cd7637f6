//! Finds or creates the local user behind a set of verified provider claims.
//!
//! Lookup is by external identity id first, then by email. Users found by
//! email are only linked to the provider identity when linking is enabled.

use crate::IdentityResult;

use ee_auth::VerifiedClaims;
use ee_core::{NewUser, ResolvedIdentity, User, normalize_email};
use ee_db::UserRepository;

use log::{debug, info, warn};
use sqlx::SqlitePool;

pub struct IdentityResolver {
    users: UserRepository,
    link_accounts_by_email: bool,
}

impl IdentityResolver {
    pub fn new(pool: SqlitePool, link_accounts_by_email: bool) -> Self {
        Self {
            users: UserRepository::new(pool),
            link_accounts_by_email,
        }
    }

    pub async fn resolve(&self, claims: &VerifiedClaims) -> IdentityResult<ResolvedIdentity> {
        let external_id = claims.external_identity_id.as_str();

        if let Some(user) = self.users.find_by_external_id(external_id).await? {
            return Ok(user.into());
        }

        let email = claims.email.as_deref().map(normalize_email);

        if let Some(email) = email.as_deref()
            && let Some(user) = self.users.find_by_email(email).await?
        {
            return self.resolve_email_match(user, external_id).await;
        }

        let new_user =
            NewUser::from_provider(external_id.to_string(), email, claims.display_name.clone());

        match self.users.create(&new_user).await {
            Ok(user) => {
                info!("Created user {} for provider identity {}", user.id, external_id);
                Ok(user.into())
            }
            Err(e) if e.is_unique_violation() => {
                debug!("Lost insert race for {}, re-reading", external_id);
                match self.reread(external_id, &new_user.email).await? {
                    Some(user) => Ok(user.into()),
                    None => {
                        warn!("Unique violation for {} but no matching user", external_id);
                        Err(e.into())
                    }
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn resolve_email_match(
        &self,
        mut user: User,
        external_id: &str,
    ) -> IdentityResult<ResolvedIdentity> {
        if !self.link_accounts_by_email || user.external_identity_id.is_some() {
            debug!(
                "Provider identity {} matched user {} by email, not linking",
                external_id, user.id
            );
            return Ok(user.into());
        }

        if self.users.attach_external_id(user.id, external_id).await? {
            info!("Linked provider identity {} to user {}", external_id, user.id);
            user.external_identity_id = Some(external_id.to_string());
            return Ok(user.into());
        }

        // Someone else linked it first; report what is stored now
        match self.users.find_by_id(user.id).await? {
            Some(current) => Ok(current.into()),
            None => Ok(user.into()),
        }
    }

    /// The record that won a concurrent insert, if it can be found
    async fn reread(&self, external_id: &str, email: &str) -> IdentityResult<Option<User>> {
        if let Some(user) = self.users.find_by_external_id(external_id).await? {
            return Ok(Some(user));
        }

        Ok(self.users.find_by_email(email).await?)
    }
}
