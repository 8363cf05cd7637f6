use crate::api::extractors::current_user::bearer_token;
use crate::{ApiError, AppState};

use ee_auth::SessionValidator;
use ee_core::ResolvedIdentity;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;

/// Like [`crate::CurrentUser`], but only accepts provider-issued tokens that
/// the provider actually verified. Used by the token exchange, so neither a
/// session token nor the development fallback can be turned into a new
/// session token.
pub struct ProviderIdentity(pub ResolvedIdentity);

impl FromRequestParts<AppState> for ProviderIdentity {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let token = bearer_token(parts)?;

            if SessionValidator::is_session_token(token) {
                return Err(ApiError::Unauthorized {
                    code: "INVALID_TOKEN",
                    message: "Invalid token: session tokens cannot be exchanged".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            // No development fallback here: an unavailable provider is a 503
            let claims = state.verifier.verify(token).await?;
            let identity = state.identity_resolver().resolve(&claims).await?;

            Ok(ProviderIdentity(identity))
        }
    }
}
