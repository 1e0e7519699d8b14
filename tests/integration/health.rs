use crate::common::TestApp;
use crate::{body_json, json_request};

use axum::http::StatusCode;
use tower::ServiceExt;

#[tokio::test]
async fn test_root_reports_running() {
    let app = TestApp::new().router();

    let response = app.oneshot(json_request("GET", "/", None, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "running");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_without_database_is_unavailable() {
    let app = TestApp::new().router();

    let response = app
        .oneshot(json_request("GET", "/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_swagger_hidden_outside_debug() {
    let app = TestApp::new().router();

    let response = app
        .oneshot(json_request("GET", "/api-docs/openapi.json", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
