use crate::{ApiError, IdentityError};

use ee_auth::AuthError;
use ee_db::DbError;

use std::panic::Location;

use axum::response::{IntoResponse, Response};
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let error = ApiError::NotFound {
        message: "Event not found".into(),
        location: here(),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Event not found");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::Validation {
        message: "title cannot be empty".into(),
        field: Some("title".into()),
        location: here(),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "title");
}

#[tokio::test]
async fn test_duplicate_email_returns_400_on_email_field() {
    let error: ApiError = IdentityError::DuplicateEmail {
        email: "a@x.com".into(),
        location: here(),
    }
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "DUPLICATE_EMAIL");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn test_invalid_credentials_returns_401_without_detail() {
    let error: ApiError = IdentityError::InvalidCredentials { location: here() }.into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(json["error"]["message"], "Incorrect email or password");
}

#[tokio::test]
async fn test_not_authorized_returns_403() {
    let error = ApiError::NotAuthorized {
        message: "Not authorized".into(),
        location: here(),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_AUTHORIZED");
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let error = ApiError::Internal {
        message: "Database operation failed".into(),
        location: here(),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn test_missing_header_converts_to_401_with_code() {
    let error: ApiError = AuthError::MissingHeader { location: here() }.into();

    assert_eq!(error.status(), StatusCode::UNAUTHORIZED);
    assert!(matches!(
        error,
        ApiError::Unauthorized {
            code: "MISSING_AUTH_HEADER",
            ..
        }
    ));
}

#[test]
fn test_expired_token_converts_to_401_token_expired() {
    let error: ApiError = AuthError::TokenExpired { location: here() }.into();

    assert!(matches!(
        error,
        ApiError::Unauthorized {
            code: "TOKEN_EXPIRED",
            ..
        }
    ));
}

#[test]
fn test_provider_unavailable_converts_to_503() {
    let error: ApiError = AuthError::ProviderUnavailable {
        message: "JWKS fetch failed".into(),
        location: here(),
    }
    .into();

    assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn test_password_hash_failure_converts_to_internal() {
    let error: ApiError = AuthError::PasswordHash {
        message: "bad salt".into(),
        location: here(),
    }
    .into();

    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_database_error_hides_details() {
    let error: ApiError = DbError::Initialization {
        message: "disk I/O error at /secret/path".into(),
        location: here(),
    }
    .into();

    match error {
        ApiError::Internal { message, .. } => {
            assert_eq!(message, "Database operation failed")
        }
        other => panic!("expected Internal, got {other:?}"),
    }
}
