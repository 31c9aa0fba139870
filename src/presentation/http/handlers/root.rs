//! Root metadata endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::startup::AppState;

pub const DOCS_DISABLED: &str = "Documentation disabled";

#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: String,
    /// Swagger UI path, or a notice when documentation is disabled
    pub docs: String,
}

/// Service name, version and where to find the docs
#[utoipa::path(
    get,
    path = "/",
    tag = "Service",
    responses(
        (status = 200, description = "Service metadata", body = RootResponse)
    )
)]
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let app = &state.settings.app;
    Json(RootResponse {
        message: "Authentication Service API",
        version: app.version.clone(),
        docs: app
            .docs_url
            .clone()
            .unwrap_or_else(|| DOCS_DISABLED.to_string()),
    })
}
