//! Shared utilities.

/// TOML configuration loading and validation.
pub mod config;

pub use config::{CoinplayConfig, ConfigError};
