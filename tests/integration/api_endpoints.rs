//! Integration tests for the one-shot API endpoints
//!
//! These tests verify that:
//! - The health and token endpoints answer
//! - Price decoding produces the normalized USD value
//! - Threshold checks compare correctly
//! - Validation and not-found errors carry the right status and body

use axum::http::StatusCode;
use serde_json::Value;

use crate::helpers::{mock_hermes, mock_hermes_down, spawn_test_api};

#[tokio::test]
async fn test_health_endpoint_returns_healthy() {
    let mock_server = mock_hermes("100", 0).await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    let response = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "pricewatch");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_tokens_endpoint_lists_known_feeds() {
    let mock_server = mock_hermes("100", 0).await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    let response = reqwest::get(format!("http://{addr}/api/tokens"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 20);

    let tokens: Vec<&str> = json["tokens"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap())
        .collect();
    assert!(tokens.contains(&"BTC/USD"));
    assert!(tokens.contains(&"DOGE/USD"));
}

#[tokio::test]
async fn test_price_endpoint_decodes_mantissa_and_expo() {
    let mock_server = mock_hermes("123456", -8).await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    // Symbols contain a slash, the path has two trailing segments.
    let response = reqwest::get(format!("http://{addr}/api/price/DOGE/USD"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["symbol"], "DOGE/USD");
    assert!((json["price"].as_f64().unwrap() - 0.00123456).abs() < 1e-12);
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_price_endpoint_uppercases_symbol() {
    let mock_server = mock_hermes("250000000", -5).await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    let response = reqwest::get(format!("http://{addr}/api/price/eth/usd"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["symbol"], "ETH/USD");
}

#[tokio::test]
async fn test_price_endpoint_unknown_symbol_is_400() {
    let mock_server = mock_hermes("100", 0).await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    let response = reqwest::get(format!("http://{addr}/api/price/FOO/USD"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Unsupported token: FOO/USD");
    assert!(json["available_tokens"].is_array());

    // A validation failure must not reach the feed.
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_price_endpoint_feed_failure_is_500() {
    let mock_server = mock_hermes_down().await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    let response = reqwest::get(format!("http://{addr}/api/price/BTC/USD"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_check_below_threshold() {
    // 2500.0 USD
    let mock_server = mock_hermes("250000000", -5).await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/api/check"))
        .json(&serde_json::json!({"symbol": "ETH/USD", "threshold": 3000}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["symbol"], "ETH/USD");
    assert!((json["price"].as_f64().unwrap() - 2500.0).abs() < 1e-6);
    assert_eq!(json["threshold"], 3000.0);
    assert_eq!(json["is_below_threshold"], true);
    assert_eq!(json["result"], true);
}

#[tokio::test]
async fn test_check_above_threshold() {
    let mock_server = mock_hermes("250000000", -5).await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/api/check"))
        .json(&serde_json::json!({"symbol": "ETH/USD", "threshold": 2000}))
        .send()
        .await
        .unwrap();

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["is_below_threshold"], false);
    assert_eq!(json["result"], false);
}

#[tokio::test]
async fn test_check_coerces_numeric_string_threshold() {
    let mock_server = mock_hermes("250000000", -5).await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/api/check"))
        .json(&serde_json::json!({"symbol": "ETH/USD", "threshold": "3000"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["threshold"], 3000.0);
    assert_eq!(json["is_below_threshold"], true);
}

#[tokio::test]
async fn test_check_missing_fields_is_400() {
    let mock_server = mock_hermes("100", 0).await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/api/check"))
        .json(&serde_json::json!({"symbol": "ETH/USD"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Both 'symbol' and 'threshold' are required");
}

#[tokio::test]
async fn test_check_non_numeric_threshold_is_400() {
    let mock_server = mock_hermes("100", 0).await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/api/check"))
        .json(&serde_json::json!({"symbol": "ETH/USD", "threshold": "lots"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["error"], "Threshold must be a number");
}

#[tokio::test]
async fn test_check_unknown_symbol_is_400() {
    let mock_server = mock_hermes("100", 0).await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/api/check"))
        .json(&serde_json::json!({"symbol": "FOO/USD", "threshold": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["error"], "Unsupported token: FOO/USD");
}

#[tokio::test]
async fn test_monitor_status_unknown_session_is_404() {
    let mock_server = mock_hermes("100", 0).await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    let response = reqwest::get(format!("http://{addr}/api/monitor/does-not-exist"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Session not found");
}

#[tokio::test]
async fn test_monitor_stop_unknown_session_is_404() {
    let mock_server = mock_hermes("100", 0).await;
    let addr = spawn_test_api(&mock_server.uri()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/api/monitor/session_99/stop"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["error"], "Session not found");
}
