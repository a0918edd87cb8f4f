//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Authentication handlers (register, login, profile).
pub mod auth;
/// Game admission and settlement handlers.
pub mod games;
/// Service banner and health check handlers.
pub mod health;
