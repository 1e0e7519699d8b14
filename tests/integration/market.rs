use crate::common::TestApp;
use crate::{body_json, json_request};

use axum::http::StatusCode;
use investa::domain::market::{PriceBar, SymbolMatch};
use time::macros::datetime;
use tower::ServiceExt;

fn symbol_match(symbol: &str, name: &str) -> SymbolMatch {
    SymbolMatch {
        symbol: symbol.to_string(),
        name: name.to_string(),
        exchange: Some("NMS".to_string()),
        sector: None,
        industry: None,
        quote_type: Some("EQUITY".to_string()),
    }
}

#[tokio::test]
async fn test_market_requires_authentication() {
    let response = TestApp::new()
        .router()
        .oneshot(json_request("GET", "/api/v1/market/quote/AAPL", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_quote_is_returned_and_recorded() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("trader@example.com", "password123")
        .await;
    test_app.provider.with_quote("AAPL", "Apple Inc.", 110.0, 100.0);

    let response = test_app
        .router()
        .oneshot(json_request(
            "GET",
            "/api/v1/market/quote/aapl",
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["type"], "quotes");
    assert_eq!(json["data"]["id"], "AAPL");
    assert_eq!(json["data"]["attributes"]["currentPrice"], 110.0);
    assert_eq!(json["data"]["attributes"]["previousClose"], 100.0);

    let snapshot = test_app.market_data.snapshot("AAPL").unwrap();
    assert_eq!(snapshot.data_source, "mock");
}

#[tokio::test]
async fn test_unknown_quote_is_not_found() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("trader@example.com", "password123")
        .await;

    let response = test_app
        .router()
        .oneshot(json_request(
            "GET",
            "/api/v1/market/quote/NOPE",
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"][0]["detail"],
        "Stock data not found for symbol: NOPE"
    );
}

#[tokio::test]
async fn test_provider_outage_is_unavailable() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("trader@example.com", "password123")
        .await;
    test_app.provider.set_failing(true);

    let response = test_app
        .router()
        .oneshot(json_request(
            "GET",
            "/api/v1/market/quote/AAPL",
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_indices_skip_unavailable_entries() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("trader@example.com", "password123")
        .await;
    test_app.provider.with_quote("^GSPC", "S&P 500", 5000.0, 4950.0);
    test_app.provider.with_quote("USDJPY=X", "USD/JPY", 150.0, 151.0);

    let response = test_app
        .router()
        .oneshot(json_request("GET", "/api/v1/market/index", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["meta"]["total"], 2);
    assert_eq!(json["data"][0]["id"], "^GSPC");
    assert_eq!(json["data"][0]["attributes"]["name"], "S&P 500");
    assert_eq!(json["data"][1]["id"], "USDJPY=X");
}

#[tokio::test]
async fn test_search_symbols() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("trader@example.com", "password123")
        .await;
    test_app.provider.with_match(symbol_match("AAPL", "Apple Inc."));
    test_app.provider.with_match(symbol_match("MSFT", "Microsoft Corporation"));

    let response = test_app
        .router()
        .oneshot(json_request(
            "GET",
            "/api/v1/market/search?q=apple&limit=5",
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["type"], "symbols");
    assert_eq!(data[0]["attributes"]["symbol"], "AAPL");
    assert_eq!(data[0]["attributes"]["quoteType"], "EQUITY");
}

#[tokio::test]
async fn test_history_defaults_and_rejects_bad_period() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("trader@example.com", "password123")
        .await;
    test_app.provider.with_history(
        "AAPL",
        vec![PriceBar {
            date: datetime!(2024-01-02 00:00 UTC),
            open: 185.0,
            high: 188.0,
            low: 183.5,
            close: 187.0,
            volume: 50_000,
        }],
    );
    let app = test_app.router();

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/v1/market/history/AAPL",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["attributes"]["period"], "1y");
    assert_eq!(json["data"]["attributes"]["interval"], "1d");
    assert_eq!(json["data"]["attributes"]["data"][0]["close"], 187.0);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/v1/market/history/AAPL?period=2w",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_symbol_with_path_characters_is_rejected() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("trader@example.com", "password123")
        .await;
    let app = test_app.router();

    for uri in [
        "/api/v1/market/quote/a%2F..%2F..%2FV7%3FX=",
        "/api/v1/market/history/AAPL%23frag",
    ] {
        let response = app
            .clone()
            .oneshot(json_request("GET", uri, Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
    }
}

#[tokio::test]
async fn test_overlong_search_query_is_rejected() {
    let test_app = TestApp::new();
    let token = test_app
        .access_token_for("trader@example.com", "password123")
        .await;

    let response = test_app
        .router()
        .oneshot(json_request(
            "GET",
            &format!("/api/v1/market/search?q={}", "a".repeat(101)),
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["detail"], "q: Search query is too long");
}
