use crate::common::TestApp;
use crate::{body_json, json_request};

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_register_creates_user() {
    let test_app = TestApp::new();
    let app = test_app.router();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({
                "email": "new@example.com",
                "password": "password123",
                "risk_tolerance": "high"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["type"], "users");
    assert_eq!(json["data"]["attributes"]["email"], "new@example.com");
    assert_eq!(json["data"]["attributes"]["riskTolerance"], "high");
    assert_eq!(json["data"]["attributes"]["isActive"], true);
    assert!(json["data"]["attributes"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let test_app = TestApp::new();
    test_app.create_user("taken@example.com", "password123", true).await;

    let response = test_app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({"email": "taken@example.com", "password": "password123"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["detail"], "Email already registered");
}

#[tokio::test]
async fn test_register_rejects_invalid_payload() {
    let response = TestApp::new()
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({"email": "not-an-email", "password": "short"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_success() {
    let test_app = TestApp::new();
    test_app.create_user("test@example.com", "password123", true).await;

    let response = test_app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "test@example.com", "password": "password123"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["attributes"]["accessToken"].is_string());
    assert!(json["data"]["attributes"]["refreshToken"].is_string());
    assert_eq!(json["data"]["attributes"]["tokenType"], "Bearer");
    assert_eq!(json["data"]["attributes"]["expiresIn"], 900);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let test_app = TestApp::new();
    test_app.create_user("test@example.com", "password123", true).await;

    let response = test_app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "test@example.com", "password": "wrongpassword"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    let response = TestApp::new()
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "ghost@example.com", "password": "password123"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["detail"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_inactive_user_is_forbidden() {
    let test_app = TestApp::new();
    test_app.create_user("idle@example.com", "password123", false).await;

    let response = test_app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "idle@example.com", "password": "password123"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_with_store_down_is_unavailable() {
    let test_app = TestApp::new();
    test_app.users.set_unavailable(true);

    let response = test_app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "test@example.com", "password": "password123"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_password_grant_form() {
    let test_app = TestApp::new();
    test_app.create_user("form@example.com", "password123", true).await;

    let response = test_app
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/token")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    "username=form%40example.com&password=password123",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["token_type"], "Bearer");
}

#[tokio::test]
async fn test_refresh_issues_new_pair() {
    let test_app = TestApp::new();
    test_app.create_user("refresh@example.com", "password123", true).await;
    let app = test_app.router();

    let login = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "refresh@example.com", "password": "password123"})),
        ))
        .await
        .unwrap();
    let login = body_json(login).await;
    let refresh_token = login["data"]["attributes"]["refreshToken"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/refresh",
            None,
            Some(json!({"refresh_token": refresh_token})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["attributes"]["accessToken"].is_string());
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let test_app = TestApp::new();
    let access = test_app
        .access_token_for("kind@example.com", "password123")
        .await;

    let response = test_app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/refresh",
            None,
            Some(json!({"refresh_token": access})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["detail"], "Could not validate credentials");
}
