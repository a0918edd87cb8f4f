//! Database layer.
//!
//! This module provides the relational store backing accounts and wagers:
//! - **In-memory SQLite**: ephemeral, used by tests and quick-start runs
//! - **Local SQLite**: file-backed via libsql (default for local development)
//! - **Turso**: remote libsql database (requires the `turso` feature)
//!
//! Select a backend via [`DatabaseProvider`]:
//! ```rust,ignore
//! use coinplay::db::DatabaseProvider;
//!
//! let store = DatabaseProvider::SQLite { path: "data/coinplay.db".into() }
//!     .create_store()
//!     .await?;
//! ```

/// Schema management and account/game persistence.
pub mod store;

pub use store::{DatabaseProvider, Store};
