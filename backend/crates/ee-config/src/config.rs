use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DatabaseConfig,
    DEFAULT_CONFIG_DIRECTORY, LoggingConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for EE_CONFIG_DIR env var, else use ./.eventease/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply EE_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: EE_CONFIG_DIR env var > ./.eventease/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|source| ConfigError::ConfigDir { source })?;
        Ok(cwd.join(DEFAULT_CONFIG_DIRECTORY))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;

        Ok(())
    }

    /// Absolute path to the database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Absolute path to the provider service-credential file.
    pub fn provider_credentials_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.auth.provider_credentials_path))
    }

    /// Absolute path to the log directory.
    pub fn log_dir(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.logging.dir))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  database: {}", self.database.path);
        info!(
            "  auth: session ttl={}s, issuer={}, secret={}",
            self.auth.session_ttl_secs,
            self.auth.session_issuer,
            if self.auth.session_secret.is_some() {
                "set"
            } else {
                "missing"
            }
        );
        info!(
            "  provider: credentials={}, jwks={} (cache {}s)",
            self.auth.provider_credentials_path, self.auth.jwks_url, self.auth.jwks_cache_ttl_secs
        );
        info!(
            "  identity: dev_fallback={}, link_accounts_by_email={}",
            self.auth.dev_fallback, self.auth.link_accounts_by_email
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("EE_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("EE_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("EE_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_option_string("EE_AUTH_SESSION_SECRET", &mut self.auth.session_secret);
        Self::apply_env_parse("EE_AUTH_SESSION_TTL_SECS", &mut self.auth.session_ttl_secs);
        Self::apply_env_string("EE_AUTH_SESSION_ISSUER", &mut self.auth.session_issuer);
        Self::apply_env_string(
            "EE_AUTH_PROVIDER_CREDENTIALS_PATH",
            &mut self.auth.provider_credentials_path,
        );
        Self::apply_env_string("EE_AUTH_JWKS_URL", &mut self.auth.jwks_url);
        Self::apply_env_parse(
            "EE_AUTH_JWKS_CACHE_TTL_SECS",
            &mut self.auth.jwks_cache_ttl_secs,
        );
        Self::apply_env_bool("EE_AUTH_DEV_FALLBACK", &mut self.auth.dev_fallback);
        Self::apply_env_bool(
            "EE_AUTH_LINK_ACCOUNTS_BY_EMAIL",
            &mut self.auth.link_accounts_by_email,
        );

        // Logging
        Self::apply_env_parse("EE_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("EE_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("EE_LOG_FILE", &mut self.logging.file);
        Self::apply_env_string("EE_LOG_DIR", &mut self.logging.dir);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
