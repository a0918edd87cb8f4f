//! TOML-based configuration for Coinplay
//!
//! This module provides declarative infrastructure configuration for the
//! server, authentication, and database via a TOML file (`coinplay.toml`).
//!
//! # Secrets
//!
//! The file never stores secrets directly. Fields such as `jwt_secret_env`
//! name an environment variable and the value is resolved at startup.
//! [`CoinplayConfig::validate`] fails fast when a referenced variable is
//! not set, so a misconfigured deployment dies before it accepts traffic.

use crate::db::DatabaseProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from coinplay.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinplayConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Token issuance and account provisioning settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Database backend selection
    #[serde(default)]
    pub database: DatabaseConfig,
}

// ============= Server Configuration =============

/// Bind address and logging for the HTTP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Default tracing filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

// ============= Authentication Configuration =============

/// Token issuance and registration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable name containing the JWT signing secret
    #[serde(default = "default_jwt_secret_env")]
    pub jwt_secret_env: String,

    /// Token lifetime in seconds
    #[serde(default = "default_token_expiry")]
    pub token_expiry: i64,

    /// Coins granted to newly registered accounts
    #[serde(default = "default_starting_coins")]
    pub starting_coins: i64,
}

fn default_jwt_secret_env() -> String {
    "COINPLAY_JWT_SECRET".to_string()
}

fn default_token_expiry() -> i64 {
    259_200
}

fn default_starting_coins() -> i64 {
    1000
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret_env: default_jwt_secret_env(),
            token_expiry: default_token_expiry(),
            starting_coins: default_starting_coins(),
        }
    }
}

// ============= Database Configuration =============

/// Database backend selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Local database path. `:memory:` (or an empty string) selects an
    /// ephemeral in-memory database.
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Environment variable for the Turso URL (optional cloud config)
    pub turso_url_env: Option<String>,

    /// Environment variable for the Turso auth token
    pub turso_token_env: Option<String>,
}

fn default_database_path() -> String {
    "./data/coinplay.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            turso_url_env: None,
            turso_token_env: None,
        }
    }
}

impl DatabaseConfig {
    /// Resolve the provider this configuration describes.
    ///
    /// Turso wins when both env var names are configured and resolve;
    /// otherwise the local path decides between a file-backed and an
    /// in-memory database.
    pub fn provider(&self) -> DatabaseProvider {
        #[cfg(feature = "turso")]
        {
            let url = self
                .turso_url_env
                .as_deref()
                .and_then(|env| std::env::var(env).ok());
            let token = self
                .turso_token_env
                .as_deref()
                .and_then(|env| std::env::var(env).ok());
            if let (Some(url), Some(auth_token)) = (url, token) {
                if !url.is_empty() && !auth_token.is_empty() {
                    return DatabaseProvider::Turso { url, auth_token };
                }
            }
        }

        if self.path.is_empty() || self.path == ":memory:" {
            DatabaseProvider::Memory
        } else {
            DatabaseProvider::SQLite {
                path: self.path.clone(),
            }
        }
    }
}

// ============= Loading and Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The configuration file could not be read
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file is not valid TOML
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A configured value is out of range or inconsistent
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A referenced environment variable is not set
    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl CoinplayConfig {
    /// Load configuration from a TOML file
    ///
    /// The server cannot run without a valid config, so any missing file,
    /// parse failure or validation failure is returned as an error for the
    /// caller to report.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: CoinplayConfig = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration for internal consistency and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_env_var(&self.auth.jwt_secret_env)?;

        if let Some(ref env) = self.database.turso_url_env {
            self.validate_env_var(env)?;
        }
        if let Some(ref env) = self.database.turso_token_env {
            self.validate_env_var(env)?;
        }

        if self.auth.token_expiry <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "token_expiry must be positive, got {}",
                self.auth.token_expiry
            )));
        }

        if self.auth.starting_coins < 0 {
            return Err(ConfigError::ValidationError(format!(
                "starting_coins must not be negative, got {}",
                self.auth.starting_coins
            )));
        }

        Ok(())
    }

    fn validate_env_var(&self, name: &str) -> Result<(), ConfigError> {
        std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
        Ok(())
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok()
    }

    /// Get the JWT secret from the environment
    pub fn jwt_secret(&self) -> Result<String, ConfigError> {
        self.resolve_env(&self.auth.jwt_secret_env)
            .ok_or_else(|| ConfigError::MissingEnvVar(self.auth.jwt_secret_env.clone()))
    }
}
