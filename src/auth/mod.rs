//! JWT Authentication and Middleware
//!
//! This module provides the authentication infrastructure for the Coinplay
//! API: password hashing, stateless session tokens, and the Axum middleware
//! that guards protected routes.
//!
//! # Module Structure
//!
//! - [`auth::jwt`](crate::auth::jwt) - Argon2id password hashing plus JWT encoding and decoding
//! - [`auth::middleware`](crate::auth::middleware) - Axum middleware and the [`CurrentUser`](middleware::CurrentUser) extractor
//!
//! # Security Features
//!
//! - **Password Hashing**: Argon2id (memory-hard) with per-password salts
//! - **JWT Tokens**: HS256 signed tokens with configurable expiration
//! - **Stateless Sessions**: no session table; a token is valid while its
//!   signature checks out and `exp` has not passed
//!
//! # Usage
//!
//! ```ignore
//! use coinplay::auth::jwt::AuthService;
//!
//! let auth = AuthService::new(jwt_secret, token_expiry_secs);
//! let token = auth.generate_token(&user.id, &user.username)?;
//! let claims = auth.verify_token(&token)?;
//! ```
//!
//! Protected routes receive the resolved account through the extractor:
//!
//! ```ignore
//! async fn profile(CurrentUser(user): CurrentUser) -> Json<ProfileResponse> {
//!     Json(ProfileResponse { username: user.username, coins: user.coins })
//! }
//! ```
//!
//! # Configuration
//!
//! Configure via `coinplay.toml`:
//! ```toml
//! [auth]
//! jwt_secret_env = "COINPLAY_JWT_SECRET"  # env var holding the signing key
//! token_expiry = 259200                   # seconds, default 3 days
//! ```

/// JWT token generation, validation, and password hashing services.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
