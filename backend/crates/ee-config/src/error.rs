use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    /// A required setting has no value
    #[error("{key} is required (set {env}) {location}")]
    Missing {
        key: &'static str,
        env: &'static str,
        location: ErrorLocation,
    },

    /// A setting is present but breaks a validation rule
    #[error("Invalid {key}: {message} {location}")]
    Invalid {
        key: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Cannot determine config directory: {source}")]
    ConfigDir {
        #[source]
        source: std::io::Error,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn invalid<S: Into<String>>(key: &'static str, message: S) -> Self {
        ConfigError::Invalid {
            key,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing(key: &'static str, env: &'static str) -> Self {
        ConfigError::Missing {
            key,
            env,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Dotted setting name (`auth.session_secret`) the error is about, if any
    pub fn key(&self) -> Option<&'static str> {
        match self {
            ConfigError::Missing { key, .. } | ConfigError::Invalid { key, .. } => Some(key),
            _ => None,
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
