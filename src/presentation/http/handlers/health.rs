//! Health Check Handler
//!
//! Liveness endpoint. It reports that the process is serving requests and
//! does not probe the database.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "auth-service";

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Basic health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}
