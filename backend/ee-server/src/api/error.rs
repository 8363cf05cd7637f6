//! REST API error types
//!
//! These errors are designed to produce consistent JSON responses
//! with appropriate HTTP status codes.

use crate::IdentityError;

use ee_auth::AuthError;
use ee_core::CoreError;
use ee_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Bad request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Email already registered (400)
    #[error("Duplicate email: {message} {location}")]
    DuplicateEmail {
        message: String,
        location: ErrorLocation,
    },

    /// Missing or rejected bearer token (401)
    #[error("Unauthorized ({code}): {message} {location}")]
    Unauthorized {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// Wrong password, or password login for a user without one (401)
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    /// Caller does not own the resource (403)
    #[error("Not authorized: {message} {location}")]
    NotAuthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Identity provider not configured or unreachable (503)
    #[error("Provider unavailable: {message} {location}")]
    ProviderUnavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. }
            | ApiError::BadRequest { .. }
            | ApiError::DuplicateEmail { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } | ApiError::InvalidCredentials { .. } => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotAuthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ProviderUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log the error with location for debugging
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let body = match self {
            ApiError::NotFound { message, .. } => ApiErrorBody {
                code: "NOT_FOUND".into(),
                message,
                field: None,
            },
            ApiError::Validation { message, field, .. } => ApiErrorBody {
                code: "VALIDATION_ERROR".into(),
                message,
                field,
            },
            ApiError::BadRequest { message, .. } => ApiErrorBody {
                code: "BAD_REQUEST".into(),
                message,
                field: None,
            },
            ApiError::DuplicateEmail { message, .. } => ApiErrorBody {
                code: "DUPLICATE_EMAIL".into(),
                message,
                field: Some("email".into()),
            },
            ApiError::Unauthorized { code, message, .. } => ApiErrorBody {
                code: code.into(),
                message,
                field: None,
            },
            ApiError::InvalidCredentials { .. } => ApiErrorBody {
                code: "INVALID_CREDENTIALS".into(),
                message: "Incorrect email or password".into(),
                field: None,
            },
            ApiError::NotAuthorized { message, .. } => ApiErrorBody {
                code: "NOT_AUTHORIZED".into(),
                message,
                field: None,
            },
            ApiError::ProviderUnavailable { message, .. } => ApiErrorBody {
                code: "PROVIDER_UNAVAILABLE".into(),
                message,
                field: None,
            },
            ApiError::Internal { message, .. } => ApiErrorBody {
                code: "INTERNAL_ERROR".into(),
                message,
                field: None,
            },
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        // Don't expose internal database details to clients
        log::error!("Database error: {}", e);
        ApiError::Internal {
            message: "Database operation failed".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert token and header failures to API errors
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if e.is_provider_unavailable() {
            log::warn!("Identity provider unavailable: {}", e);
            return ApiError::ProviderUnavailable {
                message: "Identity provider unavailable".to_string(),
                location,
            };
        }

        let message = match &e {
            AuthError::MissingHeader { .. } => "Missing authorization header".to_string(),
            AuthError::InvalidScheme { .. } => {
                "Invalid authorization scheme: expected 'Bearer'".to_string()
            }
            AuthError::TokenExpired { .. } => "Token expired".to_string(),
            AuthError::InvalidToken { message, .. } => format!("Invalid token: {}", message),
            AuthError::InvalidClaim { claim, message, .. } => {
                format!("Invalid token claim '{}': {}", claim, message)
            }
            AuthError::JwtDecode { .. } => "Invalid token".to_string(),
            _ => {
                log::error!("Auth failure: {}", e);
                return ApiError::Internal {
                    message: "Authentication backend failure".to_string(),
                    location,
                };
            }
        };

        ApiError::Unauthorized {
            code: e.error_code(),
            message,
            location,
        }
    }
}

/// Convert domain validation errors to API errors
impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        ApiError::Validation {
            message: e.message().to_string(),
            field: e.field().map(str::to_string),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert identity resolution and credential errors to API errors
impl From<IdentityError> for ApiError {
    #[track_caller]
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::DuplicateEmail { .. } => ApiError::DuplicateEmail {
                message: "Email already registered".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            IdentityError::NotFound { .. } => ApiError::NotFound {
                message: "User not found".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            IdentityError::InvalidCredentials { .. } => ApiError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            },
            IdentityError::Database { source, .. } => source.into(),
            IdentityError::Auth { source, .. } => source.into(),
        }
    }
}

/// Convert malformed JSON bodies to API errors
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
