//! Service banner and health check handlers.

use crate::types::MessageResponse;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy" while the process is serving requests
    pub status: String,
    /// Human-readable service banner
    pub message: String,
}

/// Service banner at the root path.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = MessageResponse)
    ),
    tag = "health"
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Coinplay API is running...".to_string(),
    })
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Coinplay API is running".to_string(),
    })
}
