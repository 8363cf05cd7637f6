use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity provider unavailable: {message} {location}")]
    ProviderUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Provider configuration error: {message} {location}")]
    ProviderConfig {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token signing failed: {source} {location}")]
    TokenSigning {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    PasswordHash {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Stable machine-readable code for client responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::MissingHeader { .. } => "MISSING_AUTH_HEADER",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::JwtDecode { .. } => "INVALID_TOKEN",
            Self::InvalidClaim { .. } => "INVALID_TOKEN",
            Self::ProviderUnavailable { .. } => "PROVIDER_UNAVAILABLE",
            Self::ProviderConfig { .. } => "PROVIDER_UNAVAILABLE",
            Self::TokenSigning { .. } => "INTERNAL_ERROR",
            Self::PasswordHash { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn field(&self) -> Option<String> {
        match self {
            Self::InvalidClaim { claim, .. } => Some(claim.clone()),
            _ => None,
        }
    }

    /// Whether the failure is the client's token rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidToken { .. }
                | Self::TokenExpired { .. }
                | Self::MissingHeader { .. }
                | Self::InvalidScheme { .. }
                | Self::JwtDecode { .. }
                | Self::InvalidClaim { .. }
        )
    }

    pub fn is_provider_unavailable(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable { .. } | Self::ProviderConfig { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
