//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, and the analysis chain.


use serde_json::{json, Value};
use wiremock::matchers::path;
use wiremock::{Mock, ResponseTemplate};

use test_utils::TestApiServer;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "pricescout");
}

#[tokio::test]
async fn health_is_independent_of_venue_failures() {
    let app = TestApiServer::new().await;
    let failed = app
        .server
        .get("/api/compare")
        .add_query_param("symbol", "BTC/USD")
        .await;
    assert_eq!(failed.status_code(), 404);

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    app.mount_btc_tickers().await;
    app.server
        .get("/api/compare")
        .add_query_param("symbol", "BTC/USD")
        .await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"), "Expected http_requests_total metric");
    assert!(
        body.contains("venue_requests_total"),
        "Expected venue_requests_total metric"
    );
    assert!(body.contains("comparisons_total"), "Expected comparisons_total metric");
}

#[tokio::test]
async fn exchanges_endpoint_lists_configured_venues_in_order() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/exchanges").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(
        body["exchanges"],
        json!(["binance", "coinbase", "kraken", "bitstamp"])
    );
}

#[tokio::test]
async fn price_endpoint_returns_single_venue_quote() {
    let app = TestApiServer::new().await;
    app.mount_btc_tickers().await;

    let response = app
        .server
        .get("/api/price/kraken")
        .add_query_param("symbol", "btc/usd")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["exchange"], "kraken");
    assert_eq!(body["symbol"], "BTC/USD");
    assert_eq!(body["price"], 105.0);
}

#[tokio::test]
async fn compare_endpoint_picks_extremes() {
    let app = TestApiServer::new().await;
    app.mount_btc_tickers().await;

    let response = app
        .server
        .get("/api/compare")
        .add_query_param("symbol", "BTC/USD")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["cheapest"]["exchange"], "coinbase");
    assert_eq!(body["cheapest"]["price"], 95.0);
    assert_eq!(body["most_expensive"]["exchange"], "kraken");
    assert_eq!(body["most_expensive"]["price"], 105.0);
    assert_eq!(body["quotes"].as_array().unwrap().len(), 4);
    assert!(body.get("failures").is_none());
}

#[tokio::test]
async fn compare_endpoint_reports_partial_failures() {
    let app = TestApiServer::new().await;
    // Only coinbase answers; the other venues get wiremock's default 404
    Mock::given(path("/products/ETH-USD/ticker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"price": "3000"})))
        .mount(&app.venues)
        .await;

    let response = app
        .server
        .get("/api/compare")
        .add_query_param("symbol", "ETH/USD")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["cheapest"]["exchange"], "coinbase");
    assert_eq!(body["most_expensive"]["exchange"], "coinbase");
    assert_eq!(body["failures"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn compare_endpoint_returns_not_found_when_every_venue_fails() {
    let app = TestApiServer::new().await;

    let response = app
        .server
        .get("/api/compare")
        .add_query_param("symbol", "DOGE/EUR")
        .await;
    assert_eq!(response.status_code(), 404);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("DOGE/EUR"));
    assert_eq!(body["failures"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn invalid_requests_are_bad_requests() {
    let app = TestApiServer::new().await;

    let missing = app.server.get("/api/compare").await;
    assert_eq!(missing.status_code(), 400);

    let blank = app
        .server
        .get("/api/analysis")
        .add_query_param("symbol", "   ")
        .await;
    assert_eq!(blank.status_code(), 400);

    let exchange = app
        .server
        .get("/api/price/mtgox")
        .add_query_param("symbol", "BTC/USD")
        .await;
    assert_eq!(exchange.status_code(), 400);

    let timeframe = app
        .server
        .get("/api/ohlcv/binance")
        .add_query_param("symbol", "BTC/USD")
        .add_query_param("timeframe", "7m")
        .await;
    assert_eq!(timeframe.status_code(), 400);
}

#[tokio::test]
async fn ohlcv_endpoint_returns_candles_oldest_first() {
    let app = TestApiServer::new().await;
    app.mount_btc_candles(30).await;

    let response = app
        .server
        .get("/api/ohlcv/coinbase")
        .add_query_param("symbol", "BTC/USD")
        .add_query_param("limit", "5")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["timeframe"], "1d");
    let candles = body["candles"].as_array().unwrap();
    assert_eq!(candles.len(), 5);
    assert_eq!(candles[0]["close"], 115.0);
    assert_eq!(candles[4]["close"], 119.0);
}

#[tokio::test]
async fn bollinger_and_macd_endpoints() {
    let app = TestApiServer::new().await;
    app.mount_btc_candles(40).await;

    let bollinger = app
        .server
        .get("/api/bollinger/kraken")
        .add_query_param("symbol", "BTC/USD")
        .await;
    assert_eq!(bollinger.status_code(), 200);
    let body: Value = bollinger.json();
    assert_eq!(body["exchange"], "kraken");
    assert_eq!(body["bands"]["closes"].as_array().unwrap().len(), 20);
    assert_eq!(body["bands"]["middle"], 129.5);

    let macd = app
        .server
        .get("/api/macd/kraken")
        .add_query_param("symbol", "BTC/USD")
        .await;
    assert_eq!(macd.status_code(), 200);
    let body: Value = macd.json();
    assert_eq!(body["series"]["macd"].as_array().unwrap().len(), 40);
}

#[tokio::test]
async fn analysis_endpoint_returns_report_and_summary() {
    let app = TestApiServer::new().await;
    app.mount_btc_tickers().await;
    app.mount_btc_candles(120).await;

    let response = app
        .server
        .get("/api/analysis")
        .add_query_param("symbol", "BTC/USD")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let report = &body["report"];
    assert_eq!(report["cheapest_bands"]["exchange"], "coinbase");
    assert_eq!(report["most_expensive_bands"]["exchange"], "kraken");
    assert_eq!(report["most_expensive_macd"]["exchange"], "kraken");
    assert_eq!(
        report["most_expensive_macd"]["series"]["macd"].as_array().unwrap().len(),
        100
    );

    let summary = &body["summary"];
    assert_eq!(summary["cheapest_line"], "Cheapest price: 95 USD on coinbase");
    assert_eq!(summary["most_expensive_line"], "Most expensive price: 105 USD on kraken");
    assert_eq!(
        summary["macd_title"],
        "MACD of BTC/USD on kraken (most expensive)"
    );
}

#[tokio::test]
async fn analysis_endpoint_surfaces_indicator_failures() {
    let app = TestApiServer::new().await;
    app.mount_btc_tickers().await;
    // No candle routes: the cheapest venue's candle request 404s

    let response = app
        .server
        .get("/api/analysis")
        .add_query_param("symbol", "BTC/USD")
        .await;
    assert_eq!(response.status_code(), 404);
}
