//! Route Configuration
//!
//! Configures all HTTP routes for the service. The auth, users and admin
//! routers are not part of this service yet; `api_v1_prefix` is reserved as
//! their mount point.

use axum::{routing::get, Router};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use super::handlers;
use crate::startup::AppState;

/// Create the main router
///
/// Documentation routes are mounted only when enabled; the UI pages also
/// require the OpenAPI document route they load from.
pub fn create_router(state: AppState) -> Router {
    let app = &state.settings.app;

    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/", get(handlers::root::root));

    if let Some(openapi_url) = &app.openapi_url {
        let doc = handlers::docs::openapi(app);

        // Swagger UI registers the document route itself
        router = match &app.docs_url {
            Some(docs_url) => router
                .merge(SwaggerUi::new(docs_url.clone()).url(openapi_url.clone(), doc.clone())),
            None => router.route(openapi_url, get(handlers::docs::openapi_json)),
        };

        if let Some(redoc_url) = &app.redoc_url {
            router = router.merge(Redoc::with_url(redoc_url.clone(), doc));
        }
    }

    router.with_state(state)
}
