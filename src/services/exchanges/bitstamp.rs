//! Bitstamp v2 REST client

use async_trait::async_trait;
use serde::Deserialize;

use super::rest::{parse_f64, unsupported_symbol, RestClient};
use crate::error::{FetchError, FetchResult};
use crate::models::market::{Candle, Exchange, Symbol, Timeframe};
use crate::services::market_data::MarketDataProvider;

pub const DEFAULT_BASE_URL: &str = "https://www.bitstamp.net";
const MAX_OHLC: usize = 1000;

#[derive(Debug, Deserialize)]
struct Ticker {
    last: String,
}

#[derive(Debug, Deserialize)]
struct OhlcResponse {
    data: OhlcData,
}

#[derive(Debug, Deserialize)]
struct OhlcData {
    ohlc: Vec<OhlcBar>,
}

#[derive(Debug, Deserialize)]
struct OhlcBar {
    timestamp: String,
    open: String,
    high: String,
    low: String,
    close: String,
    volume: String,
}

impl OhlcBar {
    fn into_candle(self) -> FetchResult<Candle> {
        let exchange = Exchange::Bitstamp;
        let secs: i64 = self.timestamp.trim().parse().map_err(|_| {
            FetchError::malformed(exchange, format!("invalid timestamp: {:?}", self.timestamp))
        })?;
        let timestamp = chrono::DateTime::from_timestamp(secs, 0).ok_or_else(|| {
            FetchError::malformed(exchange, format!("timestamp out of range: {}", secs))
        })?;
        Ok(Candle::new(
            parse_f64(exchange, "open", &self.open)?,
            parse_f64(exchange, "high", &self.high)?,
            parse_f64(exchange, "low", &self.low)?,
            parse_f64(exchange, "close", &self.close)?,
            parse_f64(exchange, "volume", &self.volume)?,
            timestamp,
        ))
    }
}

pub struct BitstampClient {
    rest: RestClient,
}

impl BitstampClient {
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            rest: RestClient::new(Exchange::Bitstamp, base_url, client),
        }
    }

    /// `BTC/USD` -> `btcusd`
    pub fn pair_name(symbol: &Symbol) -> FetchResult<String> {
        let (base, quote) = symbol
            .pair()
            .ok_or_else(|| unsupported_symbol(Exchange::Bitstamp, symbol))?;
        Ok(format!("{}{}", base, quote).to_ascii_lowercase())
    }
}

#[async_trait]
impl MarketDataProvider for BitstampClient {
    fn exchange(&self) -> Exchange {
        Exchange::Bitstamp
    }

    async fn fetch_ticker(&self, symbol: &Symbol) -> FetchResult<f64> {
        let path = format!("/api/v2/ticker/{}/", Self::pair_name(symbol)?);
        let ticker: Ticker = self.rest.get_json(&path, &[], symbol).await?;
        parse_f64(Exchange::Bitstamp, "last", &ticker.last)
    }

    async fn fetch_ohlcv(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        limit: usize,
    ) -> FetchResult<Vec<Candle>> {
        let path = format!("/api/v2/ohlc/{}/", Self::pair_name(symbol)?);
        let query = [
            ("step", timeframe.as_seconds().to_string()),
            ("limit", limit.clamp(1, MAX_OHLC).to_string()),
        ];
        let response: OhlcResponse = self.rest.get_json(&path, &query, symbol).await?;

        response
            .data
            .ohlc
            .into_iter()
            .map(OhlcBar::into_candle)
            .collect()
    }
}
