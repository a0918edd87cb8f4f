//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Coinplay, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Authentication (`/api/auth`)
//! - `POST /api/auth/register` - Register new user (starts with the configured coin grant)
//! - `POST /api/auth/login` - Login by email or username, receive JWT token
//! - `GET /api/auth/me` - Profile of the authenticated user
//!
//! ## Games (`/api/games`)
//! - `POST /api/games` - Open a wager; the stake is debited atomically or the request is refused
//! - `GET /api/games` - List the caller's games
//! - `GET /api/games/{game_id}` - Get one game (ownership-scoped)
//! - `PUT /api/games/{game_id}` - Settle an active game (won/lost/cancelled)
//!
//! ## Health
//! - `GET /` - Service banner
//! - `GET /health` - Health check endpoint
//!
//! # Authentication
//!
//! Protected endpoints require a valid JWT token in the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! # OpenAPI Documentation
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
