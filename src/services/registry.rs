//! Static mapping from [`Exchange`] tags to provider implementations

use std::sync::Arc;
use tracing::debug;

use crate::config::{AppConfig, ConfigError};
use crate::error::{FetchError, FetchResult};
use crate::metrics::Metrics;
use crate::models::market::{Candle, Exchange, Symbol, Timeframe};
use crate::services::exchanges::{
    normalize_candles, BinanceClient, BitstampClient, CoinbaseClient, KrakenClient,
};
use crate::services::market_data::MarketDataProvider;

/// Ordered set of venue providers.
///
/// Iteration order is the comparison order, so it also decides ties.
#[derive(Clone, Default)]
pub struct ExchangeRegistry {
    providers: Vec<Arc<dyn MarketDataProvider>>,
    metrics: Option<Arc<Metrics>>,
}

impl ExchangeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build REST clients for every configured exchange
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let registry = config.exchanges.iter().fold(Self::new(), |registry, &exchange| {
            let base_url = config.endpoints.get(exchange).to_string();
            registry.with_provider(Self::rest_provider(exchange, base_url, client.clone()))
        });
        Ok(registry)
    }

    /// REST implementation for a venue
    pub fn rest_provider(
        exchange: Exchange,
        base_url: String,
        client: reqwest::Client,
    ) -> Arc<dyn MarketDataProvider> {
        match exchange {
            Exchange::Binance => Arc::new(BinanceClient::with_client(base_url, client)),
            Exchange::Coinbase => Arc::new(CoinbaseClient::with_client(base_url, client)),
            Exchange::Kraken => Arc::new(KrakenClient::with_client(base_url, client)),
            Exchange::Bitstamp => Arc::new(BitstampClient::with_client(base_url, client)),
        }
    }

    /// Add a provider; replaces an existing one for the same exchange in place
    pub fn with_provider(mut self, provider: Arc<dyn MarketDataProvider>) -> Self {
        let exchange = provider.exchange();
        match self.providers.iter().position(|p| p.exchange() == exchange) {
            Some(index) => self.providers[index] = provider,
            None => self.providers.push(provider),
        }
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn metrics(&self) -> Option<&Arc<Metrics>> {
        self.metrics.as_ref()
    }

    pub fn exchanges(&self) -> Vec<Exchange> {
        self.providers.iter().map(|p| p.exchange()).collect()
    }

    pub fn provider(&self, exchange: Exchange) -> FetchResult<&Arc<dyn MarketDataProvider>> {
        self.providers
            .iter()
            .find(|p| p.exchange() == exchange)
            .ok_or(FetchError::NotConfigured { exchange })
    }

    /// Latest traded price on one venue.
    ///
    /// Non-finite or non-positive prices are reported as malformed.
    pub async fn get_price(&self, exchange: Exchange, symbol: &Symbol) -> FetchResult<f64> {
        let result = self
            .provider(exchange)?
            .fetch_ticker(symbol)
            .await
            .and_then(|price| {
                if price.is_finite() && price > 0.0 {
                    Ok(price)
                } else {
                    Err(FetchError::malformed(
                        exchange,
                        format!("invalid last price {}", price),
                    ))
                }
            });
        self.record(exchange, "ticker", result.is_ok());
        if let Ok(price) = result {
            debug!(exchange = %exchange, symbol = %symbol, price, "Fetched ticker");
        }
        result
    }

    /// Up to `count` most recent candles, oldest first
    pub async fn get_ohlcv(
        &self,
        exchange: Exchange,
        symbol: &Symbol,
        timeframe: Timeframe,
        count: usize,
    ) -> FetchResult<Vec<Candle>> {
        let result = self
            .provider(exchange)?
            .fetch_ohlcv(symbol, timeframe, count)
            .await
            .map(|candles| normalize_candles(candles, count));
        self.record(exchange, "ohlcv", result.is_ok());
        if let Ok(candles) = &result {
            debug!(
                exchange = %exchange,
                symbol = %symbol,
                timeframe = %timeframe,
                requested = count,
                received = candles.len(),
                "Fetched candles"
            );
        }
        result
    }

    fn record(&self, exchange: Exchange, operation: &str, success: bool) {
        if let Some(metrics) = &self.metrics {
            metrics.record_venue_request(exchange, operation, success);
        }
    }
}
