//! Health and Root Endpoint Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{assert_status, json_body, TestApp};

/// Test basic health check endpoint returns 200 OK with the service name
#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new(&[]);

    let response = app.get("/health").await;

    assert_status(&response, StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"status": "healthy", "service": "auth-service"})
    );
}

/// Test root endpoint reports version and docs location
#[tokio::test]
async fn test_root_reports_metadata() {
    let app = TestApp::new(&[("APP_VERSION", "1.2.3")]);

    let response = app.get("/").await;

    assert_status(&response, StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "message": "Authentication Service API",
            "version": "1.2.3",
            "docs": "/docs"
        })
    );
}

/// Test root endpoint in production reports docs as disabled
#[tokio::test]
async fn test_root_in_production_reports_docs_disabled() {
    let app = TestApp::new(&[("APP_ENVIRONMENT", "production")]);

    let body = json_body(app.get("/").await).await;

    assert_eq!(body["docs"], "Documentation disabled");
}

/// Test unknown routes return 404
#[tokio::test]
async fn test_unknown_route_returns_not_found() {
    let app = TestApp::new(&[]);

    let response = app.get("/api/v1/auth/login").await;

    assert_status(&response, StatusCode::NOT_FOUND);
}
