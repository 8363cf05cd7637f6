//! Axum extractors for bearer-token authentication

use crate::{ApiError, ApiResult, AppState};

use ee_auth::{SessionValidator, extract_bearer};
use ee_core::ResolvedIdentity;
use ee_db::UserRepository;

use std::future::Future;
use std::panic::Location;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use error_location::ErrorLocation;

/// The identity behind the request's bearer token.
///
/// HS256 tokens are local session tokens; anything else goes to the
/// identity provider. When the provider is unavailable and
/// `auth.dev_fallback` is set, the development identity is used instead.
/// A rejected token is never replaced by the development identity.
pub struct CurrentUser(pub ResolvedIdentity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let token = bearer_token(parts)?;

            let identity = if SessionValidator::is_session_token(token) {
                session_identity(state, token).await?
            } else {
                provider_identity(state, token).await?
            };

            log::debug!("Request authenticated as user {}", identity.id);
            Ok(CurrentUser(identity))
        }
    }
}

/// Token from the Authorization header
pub(crate) fn bearer_token(parts: &Parts) -> ApiResult<&str> {
    // A non-UTF-8 value is treated like an unknown scheme
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    Ok(extract_bearer(header)?)
}

async fn session_identity(state: &AppState, token: &str) -> ApiResult<ResolvedIdentity> {
    let claims = state.session_validator.validate(token)?;
    let user_id = claims.user_id()?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized {
            code: "INVALID_TOKEN",
            message: "Invalid token: unknown user".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(user.into())
}

/// Verify a provider token and map it onto a local user, falling back to
/// the development identity only while the provider is unavailable
async fn provider_identity(
    state: &AppState,
    token: &str,
) -> ApiResult<ResolvedIdentity> {
    match state.verifier.verify(token).await {
        Ok(claims) => Ok(state.identity_resolver().resolve(&claims).await?),
        Err(e) if e.is_provider_unavailable() && state.dev_fallback => {
            log::warn!("Identity provider unavailable, using development identity: {}", e);
            Ok(ResolvedIdentity::development())
        }
        Err(e) => Err(e.into()),
    }
}
