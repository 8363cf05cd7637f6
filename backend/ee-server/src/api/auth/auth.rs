//! Auth REST API handlers
//!
//! Password registration and login, the caller's resolved identity, and the
//! exchange of a provider token for a session token.

use crate::{
    ApiResult, AppState, CurrentUser, LoginRequest, ProviderIdentity, RegisterRequest,
    TokenResponse, UserOut,
};

use ee_core::{ResolvedIdentity, validate_email, validate_name, validate_password};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserOut>)> {
    let Json(req) = payload?;

    validate_name(&req.name)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let user = state
        .credential_store()
        .register(&req.name, &req.email, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(UserOut::from(user))))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(req) = payload?;

    let token = state
        .credential_store()
        .authenticate(&req.email, &req.password)
        .await?;

    Ok(Json(token.into()))
}

/// GET /auth/me
pub async fn me(CurrentUser(identity): CurrentUser) -> Json<ResolvedIdentity> {
    Json(identity)
}

/// POST /auth/token
///
/// Exchange a verified provider token for a locally-signed session token.
pub async fn exchange_token(
    State(state): State<AppState>,
    ProviderIdentity(identity): ProviderIdentity,
) -> ApiResult<Json<TokenResponse>> {
    let token = state.session_issuer.issue(&identity)?;
    log::info!("Issued session token for user {}", identity.id);

    Ok(Json(token.into()))
}
