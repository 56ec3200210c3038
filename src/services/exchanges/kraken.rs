//! Kraken public REST client

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::rest::{parse_f64, row_field, unsupported_symbol, value_f64, value_timestamp, RestClient};
use crate::error::{FetchError, FetchResult};
use crate::models::market::{Candle, Exchange, Symbol, Timeframe};
use crate::services::market_data::MarketDataProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.kraken.com";

/// Every Kraken response wraps its payload with an error list
#[derive(Debug, Deserialize)]
struct KrakenResponse<T> {
    #[serde(default)]
    error: Vec<String>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct TickerInfo {
    /// Last trade closed: [price, lot volume]
    c: Vec<String>,
}

pub struct KrakenClient {
    rest: RestClient,
}

impl KrakenClient {
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            rest: RestClient::new(Exchange::Kraken, base_url, client),
        }
    }

    /// `BTC/USD` -> `XBTUSD`; Kraken names bitcoin XBT
    pub fn pair_name(symbol: &Symbol) -> FetchResult<String> {
        let (base, quote) = symbol
            .pair()
            .ok_or_else(|| unsupported_symbol(Exchange::Kraken, symbol))?;
        let rename = |asset: &str| match asset {
            "BTC" => "XBT".to_string(),
            other => other.to_string(),
        };
        Ok(format!("{}{}", rename(base), rename(quote)))
    }

    fn unwrap_result<T>(response: KrakenResponse<T>, symbol: &Symbol) -> FetchResult<T> {
        if !response.error.is_empty() {
            if response.error.iter().any(|e| e.contains("Unknown asset pair")) {
                return Err(unsupported_symbol(Exchange::Kraken, symbol));
            }
            return Err(FetchError::Api {
                exchange: Exchange::Kraken,
                status: 200,
                message: response.error.join("; "),
            });
        }
        response
            .result
            .ok_or_else(|| FetchError::malformed(Exchange::Kraken, "missing result"))
    }
}

#[async_trait]
impl MarketDataProvider for KrakenClient {
    fn exchange(&self) -> Exchange {
        Exchange::Kraken
    }

    async fn fetch_ticker(&self, symbol: &Symbol) -> FetchResult<f64> {
        let pair = Self::pair_name(symbol)?;
        let response: KrakenResponse<HashMap<String, TickerInfo>> = self
            .rest
            .get_json("/0/public/Ticker", &[("pair", pair)], symbol)
            .await?;
        let result = Self::unwrap_result(response, symbol)?;

        // Result is keyed by Kraken's canonical pair name (e.g. XXBTZUSD)
        let ticker = result
            .into_values()
            .next()
            .ok_or_else(|| unsupported_symbol(Exchange::Kraken, symbol))?;
        let last = ticker
            .c
            .first()
            .ok_or_else(|| FetchError::malformed(Exchange::Kraken, "empty last trade field"))?;
        parse_f64(Exchange::Kraken, "last", last)
    }

    async fn fetch_ohlcv(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        _limit: usize,
    ) -> FetchResult<Vec<Candle>> {
        let pair = Self::pair_name(symbol)?;
        let query = [
            ("pair", pair),
            ("interval", timeframe.as_minutes().to_string()),
        ];
        let response: KrakenResponse<Map<String, Value>> =
            self.rest.get_json("/0/public/OHLC", &query, symbol).await?;
        let result = Self::unwrap_result(response, symbol)?;

        // Rows are [time, open, high, low, close, vwap, volume, count]
        let rows = result
            .iter()
            .find(|(key, _)| key.as_str() != "last")
            .and_then(|(_, value)| value.as_array())
            .ok_or_else(|| FetchError::malformed(Exchange::Kraken, "missing OHLC rows"))?;

        let exchange = Exchange::Kraken;
        rows.iter()
            .map(|row| -> FetchResult<Candle> {
                let row = row
                    .as_array()
                    .ok_or_else(|| FetchError::malformed(exchange, "OHLC row is not an array"))?;
                Ok(Candle::new(
                    value_f64(exchange, "open", row_field(exchange, row, 1)?)?,
                    value_f64(exchange, "high", row_field(exchange, row, 2)?)?,
                    value_f64(exchange, "low", row_field(exchange, row, 3)?)?,
                    value_f64(exchange, "close", row_field(exchange, row, 4)?)?,
                    value_f64(exchange, "volume", row_field(exchange, row, 6)?)?,
                    value_timestamp(exchange, row_field(exchange, row, 0)?, false)?,
                ))
            })
            .collect()
    }
}
