//! Unit tests for the exchange registry

use crate::support::{candles_from_closes, symbol, MockProvider};
use pricescout::config::{AppConfig, ExchangeEndpoints};
use pricescout::error::FetchError;
use pricescout::metrics::Metrics;
use pricescout::models::{Exchange, Timeframe};
use pricescout::services::ExchangeRegistry;
use std::sync::Arc;

#[test]
fn test_from_config_keeps_configured_order() {
    let config = AppConfig {
        exchanges: vec![Exchange::Kraken, Exchange::Binance],
        endpoints: ExchangeEndpoints::uniform("http://127.0.0.1:1"),
        ..AppConfig::default()
    };
    let registry = ExchangeRegistry::from_config(&config).unwrap();
    assert_eq!(registry.exchanges(), vec![Exchange::Kraken, Exchange::Binance]);
}

#[test]
fn test_with_provider_replaces_same_exchange_in_place() {
    let registry = ExchangeRegistry::new()
        .with_provider(MockProvider::with_price(Exchange::Binance, 1.0).shared())
        .with_provider(MockProvider::with_price(Exchange::Kraken, 2.0).shared())
        .with_provider(MockProvider::with_price(Exchange::Binance, 3.0).shared());
    assert_eq!(registry.exchanges(), vec![Exchange::Binance, Exchange::Kraken]);
}

#[tokio::test]
async fn test_get_price_unknown_exchange_is_not_configured() {
    let registry = ExchangeRegistry::new()
        .with_provider(MockProvider::with_price(Exchange::Binance, 1.0).shared());
    let err = registry
        .get_price(Exchange::Bitstamp, &symbol("BTC/USD"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::NotConfigured { exchange: Exchange::Bitstamp }));
}

#[tokio::test]
async fn test_get_price_rejects_non_positive_and_non_finite_prices() {
    for price in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let registry = ExchangeRegistry::new()
            .with_provider(MockProvider::with_price(Exchange::Kraken, price).shared());
        let err = registry
            .get_price(Exchange::Kraken, &symbol("BTC/USD"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Malformed { .. }), "price {} accepted", price);
    }
}

#[tokio::test]
async fn test_get_ohlcv_normalizes_order_and_length() {
    let mut candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    candles.reverse();
    let registry = ExchangeRegistry::new().with_provider(
        MockProvider::with_price(Exchange::Coinbase, 1.0)
            .with_candles(candles)
            .shared(),
    );

    let result = registry
        .get_ohlcv(Exchange::Coinbase, &symbol("BTC/USD"), Timeframe::OneDay, 3)
        .await
        .unwrap();
    let closes: Vec<f64> = result.iter().map(|c| c.close).collect();
    assert_eq!(closes, vec![3.0, 4.0, 5.0]);
}

#[tokio::test]
async fn test_fetches_are_counted_in_metrics() {
    let metrics = Arc::new(Metrics::new().unwrap());
    let registry = ExchangeRegistry::new()
        .with_provider(MockProvider::with_price(Exchange::Binance, 10.0).shared())
        .with_provider(MockProvider::failing(Exchange::Kraken).shared())
        .with_metrics(metrics.clone());

    let btc = symbol("BTC/USD");
    registry.get_price(Exchange::Binance, &btc).await.unwrap();
    registry.get_price(Exchange::Kraken, &btc).await.unwrap_err();

    let ok = metrics
        .venue_requests_total
        .with_label_values(&["binance", "ticker", "ok"])
        .get();
    let failed = metrics
        .venue_requests_total
        .with_label_values(&["kraken", "ticker", "error"])
        .get();
    assert_eq!((ok, failed), (1, 1));
}
