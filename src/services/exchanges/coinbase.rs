//! Coinbase Exchange (formerly Coinbase Pro) REST client

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::rest::{parse_f64, row_field, unsupported_symbol, value_f64, value_timestamp, RestClient};
use crate::error::{FetchError, FetchResult};
use crate::models::market::{Candle, Exchange, Symbol, Timeframe};
use crate::services::market_data::MarketDataProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.exchange.coinbase.com";

#[derive(Debug, Deserialize)]
struct ProductTicker {
    price: String,
}

pub struct CoinbaseClient {
    rest: RestClient,
}

impl CoinbaseClient {
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            rest: RestClient::new(Exchange::Coinbase, base_url, client),
        }
    }

    /// `BTC/USD` -> `BTC-USD`
    pub fn product_id(symbol: &Symbol) -> FetchResult<String> {
        let (base, quote) = symbol
            .pair()
            .ok_or_else(|| unsupported_symbol(Exchange::Coinbase, symbol))?;
        Ok(format!("{}-{}", base, quote))
    }

    /// Candle granularity in seconds; Coinbase has no 4h bucket
    fn granularity(timeframe: Timeframe) -> FetchResult<u64> {
        match timeframe {
            Timeframe::FourHours => Err(FetchError::UnsupportedTimeframe {
                exchange: Exchange::Coinbase,
                timeframe,
            }),
            other => Ok(other.as_seconds()),
        }
    }
}

#[async_trait]
impl MarketDataProvider for CoinbaseClient {
    fn exchange(&self) -> Exchange {
        Exchange::Coinbase
    }

    async fn fetch_ticker(&self, symbol: &Symbol) -> FetchResult<f64> {
        let path = format!("/products/{}/ticker", Self::product_id(symbol)?);
        let ticker: ProductTicker = self.rest.get_json(&path, &[], symbol).await?;
        parse_f64(Exchange::Coinbase, "price", &ticker.price)
    }

    async fn fetch_ohlcv(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        _limit: usize,
    ) -> FetchResult<Vec<Candle>> {
        let granularity = Self::granularity(timeframe)?;
        let path = format!("/products/{}/candles", Self::product_id(symbol)?);
        let query = [("granularity", granularity.to_string())];
        // Rows are [time, low, high, open, close, volume], newest first
        let rows: Vec<Vec<Value>> = self.rest.get_json(&path, &query, symbol).await?;

        let exchange = Exchange::Coinbase;
        rows.iter()
            .map(|row| -> FetchResult<Candle> {
                Ok(Candle::new(
                    value_f64(exchange, "open", row_field(exchange, row, 3)?)?,
                    value_f64(exchange, "high", row_field(exchange, row, 2)?)?,
                    value_f64(exchange, "low", row_field(exchange, row, 1)?)?,
                    value_f64(exchange, "close", row_field(exchange, row, 4)?)?,
                    value_f64(exchange, "volume", row_field(exchange, row, 5)?)?,
                    value_timestamp(exchange, row_field(exchange, row, 0)?, false)?,
                ))
            })
            .collect()
    }
}
