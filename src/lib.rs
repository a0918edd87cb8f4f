//! # Coinplay - Credential-Gated Wager Backend
//!
//! A wager admission server built in Rust: account registration with
//! uniqueness enforcement, Argon2 password storage, stateless JWT sessions,
//! and balance-checked game creation over SQLite or Turso.
//!
//! ## Overview
//!
//! Coinplay can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `coinplay-server` binary
//! 2. **As a library** - Import components into your own Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! coinplay-server = "0.4"
//! ```
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use coinplay::{AuthService, Store};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Open an in-memory store and register a user
//!     let store = Store::new_memory().await?;
//!     let auth = AuthService::new("a-secret-at-least-32-characters-long".into(), 259_200);
//!
//!     let hash = auth.hash_password("hunter2!")?;
//!     store
//!         .create_user("u-1", "alice", "alice@example.com", "+15550100", &hash, 1000)
//!         .await?;
//!
//!     let token = auth.generate_token("u-1", "alice")?;
//!     let claims = auth.verify_token(&token)?;
//!     assert_eq!(claims.sub, "u-1");
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Admission-Gated Wagers
//!
//! ```rust,ignore
//! use coinplay::{AdmissionGate, Store};
//! use std::sync::Arc;
//!
//! let store = Arc::new(Store::new_memory().await?);
//! let gate = AdmissionGate::new(store.clone());
//!
//! // The stake is debited atomically; a stale balance snapshot can never
//! // overdraw the account.
//! if let Some(user) = store.get_user_by_id("u-1").await? {
//!     let game = gate.admit(&user, "dice", 250).await?;
//!     println!("admitted wager {}", game.id);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `local-db` | Local SQLite database (default) |
//! | `turso` | Remote Turso database |
//! | `swagger-ui` | Interactive OpenAPI docs at `/swagger-ui/` |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - JWT authentication and middleware
//! - [`cli`] - Command-line interface and project scaffolding
//! - [`db`] - Database abstraction (SQLite, Turso)
//! - [`types`] - Common types and error handling
//! - [`utils`] - TOML configuration
//! - [`wager`] - Balance-gated admission control
//!
//! ## Architecture
//!
//! Infrastructure configuration lives in `coinplay.toml`; secrets are
//! resolved through environment variables the file names. The config is
//! loaded once at startup, so the token signing key is fixed for the
//! lifetime of the process.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// JWT authentication and middleware.
pub mod auth;
/// Command-line interface (init, config) and colored output.
pub mod cli;
/// Database access (SQLite, Turso).
pub mod db;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities (TOML).
pub mod utils;
/// Wager admission control.
pub mod wager;

// Re-export commonly used types
pub use auth::jwt::AuthService;
pub use db::{DatabaseProvider, Store};
pub use types::{AppError, Result};
pub use utils::config::{CoinplayConfig, ConfigError};
pub use wager::AdmissionGate;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<CoinplayConfig>,
    /// Accounts and games store
    pub store: Arc<Store>,
    /// Password hashing and token service
    pub auth_service: Arc<AuthService>,
    /// Balance-gated wager admission
    pub admissions: AdmissionGate,
}

impl AppState {
    /// Build shared state from a loaded config and an open store.
    ///
    /// Resolves the JWT secret from the environment variable named by the
    /// config, so a missing secret fails here rather than at the first
    /// login.
    pub fn new(config: CoinplayConfig, store: Store) -> std::result::Result<Self, ConfigError> {
        let jwt_secret = config.jwt_secret()?;
        let store = Arc::new(store);

        Ok(Self {
            auth_service: Arc::new(AuthService::new(jwt_secret, config.auth.token_expiry)),
            admissions: AdmissionGate::new(store.clone()),
            store,
            config: Arc::new(config),
        })
    }
}
