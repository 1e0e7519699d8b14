use crate::common::TestApp;
use crate::{body_json, json_request};

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn test_portfolio_requires_authentication() {
    let response = TestApp::new()
        .router()
        .oneshot(json_request("GET", "/api/v1/portfolio", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_holding_lifecycle() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("investor@example.com", "password123")
        .await;
    let app = test_app.router();

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/portfolio",
            Some(&token),
            Some(json!({
                "symbol": " aapl ",
                "quantity": "10",
                "average_price": "150.25",
                "purchase_date": "2024-01-15"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["type"], "holdings");
    assert_eq!(created["data"]["attributes"]["symbol"], "AAPL");
    assert_eq!(created["data"]["attributes"]["averagePrice"], "150.25");
    assert_eq!(created["data"]["attributes"]["purchaseDate"], "2024-01-15");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // List
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/v1/portfolio", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed["meta"]["total"], 1);
    assert_eq!(listed["data"][0]["id"], id.as_str());

    // Update
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/portfolio/{}", id),
            Some(&token),
            Some(json!({"quantity": "12.5"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["attributes"]["quantity"], "12.5");
    assert_eq!(updated["data"]["attributes"]["averagePrice"], "150.25");

    // Delete
    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/v1/portfolio/{}", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(json_request("GET", "/api/v1/portfolio", Some(&token), None))
        .await
        .unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed["meta"]["total"], 0);
}

#[tokio::test]
async fn test_duplicate_symbol_conflicts() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("investor@example.com", "password123")
        .await;
    let app = test_app.router();
    let body = json!({"symbol": "MSFT", "quantity": "1", "average_price": "300"});

    let first = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/portfolio", Some(&token), Some(body.clone())))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("POST", "/api/v1/portfolio", Some(&token), Some(body)))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(
        json["errors"][0]["detail"],
        "Symbol MSFT already exists in portfolio"
    );
}

#[tokio::test]
async fn test_non_positive_quantity_is_rejected() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("investor@example.com", "password123")
        .await;

    let response = test_app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/v1/portfolio",
            Some(&token),
            Some(json!({"symbol": "AAPL", "quantity": "0", "average_price": "100"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_other_users_holdings_are_invisible() {
    let test_app = TestApp::new();
    let owner = test_app
        .access_token_for("owner@example.com", "password123")
        .await;
    let intruder = test_app
        .access_token_for("intruder@example.com", "password123")
        .await;
    let app = test_app.router();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/portfolio",
            Some(&owner),
            Some(json!({"symbol": "TSLA", "quantity": "3", "average_price": "200"})),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/v1/portfolio/{}", id),
            Some(&intruder),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(json_request("GET", "/api/v1/portfolio", Some(&intruder), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["meta"]["total"], 0);
}

#[tokio::test]
async fn test_update_missing_holding() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("investor@example.com", "password123")
        .await;

    let response = test_app
        .router()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/portfolio/{}", Uuid::new_v4()),
            Some(&token),
            Some(json!({"quantity": "1"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["detail"], "Portfolio item not found");
}

#[tokio::test]
async fn test_amounts_beyond_storage_precision_are_rejected() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("investor@example.com", "password123")
        .await;
    let app = test_app.router();

    for body in [
        json!({"symbol": "AAPL", "quantity": "1000000000000", "average_price": "1"}),
        json!({"symbol": "AAPL", "quantity": "1", "average_price": "1.23456"}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/v1/portfolio", Some(&token), Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    let response = app
        .oneshot(json_request("GET", "/api/v1/portfolio", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["meta"]["total"], 0);
}
