//! API documentation: the OpenAPI document served on its own when the
//! Swagger UI is disabled. The UI pages come from `utoipa-swagger-ui` and
//! `utoipa-redoc`, mounted in the router.

use axum::extract::State;
use axum::Json;
use utoipa::OpenApi;

use super::{health, root};
use crate::config::AppConfig;
use crate::startup::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(health::health_check, root::root),
    components(schemas(health::HealthResponse, root::RootResponse)),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Service", description = "Service metadata")
    )
)]
pub struct ApiDoc;

/// OpenAPI document with title, version and description taken from settings.
pub fn openapi(settings: &AppConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = settings.title.clone();
    doc.info.version = settings.version.clone();
    doc.info.description = Some(settings.description.clone());
    doc
}

pub async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(openapi(&state.settings.app))
}
