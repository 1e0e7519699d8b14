use crate::common::TestApp;
use crate::{body_json, json_request};

use axum::http::{StatusCode, header};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_profile_requires_authentication() {
    let response = TestApp::new()
        .router()
        .oneshot(json_request("GET", "/api/v1/users/profile", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["detail"], "Not authenticated");
}

#[tokio::test]
async fn test_profile_rejects_garbage_token() {
    let response = TestApp::new()
        .router()
        .oneshot(json_request(
            "GET",
            "/api/v1/users/profile",
            Some("not.a.token"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["detail"], "Could not validate credentials");
}

#[tokio::test]
async fn test_get_profile() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("me@example.com", "password123")
        .await;

    let response = test_app
        .router()
        .oneshot(json_request("GET", "/api/v1/users/profile", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["type"], "users");
    assert_eq!(json["data"]["attributes"]["email"], "me@example.com");
    assert_eq!(json["data"]["attributes"]["riskTolerance"], "medium");
}

#[tokio::test]
async fn test_deactivated_user_token_is_forbidden() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("gone@example.com", "password123")
        .await;
    test_app.users.set_active("gone@example.com", false);

    let response = test_app
        .router()
        .oneshot(json_request("GET", "/api/v1/users/profile", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_profile_risk_tolerance() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("me@example.com", "password123")
        .await;

    let response = test_app
        .router()
        .oneshot(json_request(
            "PUT",
            "/api/v1/users/profile",
            Some(&token),
            Some(json!({"risk_tolerance": "low"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["attributes"]["riskTolerance"], "low");
}

#[tokio::test]
async fn test_update_profile_rejects_unknown_tolerance() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("me@example.com", "password123")
        .await;

    let response = test_app
        .router()
        .oneshot(json_request(
            "PUT",
            "/api/v1/users/profile",
            Some(&token),
            Some(json!({"risk_tolerance": "reckless"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
