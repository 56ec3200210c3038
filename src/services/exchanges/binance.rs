//! Binance spot REST client

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::rest::{parse_f64, row_field, unsupported_symbol, value_f64, value_timestamp, RestClient};
use crate::error::FetchResult;
use crate::models::market::{Candle, Exchange, Symbol, Timeframe};
use crate::services::market_data::MarketDataProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";
const MAX_KLINES: usize = 1000;

#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: String,
}

pub struct BinanceClient {
    rest: RestClient,
}

impl BinanceClient {
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            rest: RestClient::new(Exchange::Binance, base_url, client),
        }
    }

    /// `BTC/USDT` -> `BTCUSDT`
    pub fn market_symbol(symbol: &Symbol) -> FetchResult<String> {
        let (base, quote) = symbol
            .pair()
            .ok_or_else(|| unsupported_symbol(Exchange::Binance, symbol))?;
        Ok(format!("{}{}", base, quote))
    }
}

#[async_trait]
impl MarketDataProvider for BinanceClient {
    fn exchange(&self) -> Exchange {
        Exchange::Binance
    }

    async fn fetch_ticker(&self, symbol: &Symbol) -> FetchResult<f64> {
        let market = Self::market_symbol(symbol)?;
        let ticker: TickerPrice = self
            .rest
            .get_json("/api/v3/ticker/price", &[("symbol", market)], symbol)
            .await?;
        parse_f64(Exchange::Binance, "price", &ticker.price)
    }

    async fn fetch_ohlcv(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        limit: usize,
    ) -> FetchResult<Vec<Candle>> {
        let market = Self::market_symbol(symbol)?;
        let query = [
            ("symbol", market),
            ("interval", timeframe.as_str().to_string()),
            ("limit", limit.clamp(1, MAX_KLINES).to_string()),
        ];
        let rows: Vec<Vec<Value>> = self.rest.get_json("/api/v3/klines", &query, symbol).await?;

        let exchange = Exchange::Binance;
        rows.iter()
            .map(|row| -> FetchResult<Candle> {
                Ok(Candle::new(
                    value_f64(exchange, "open", row_field(exchange, row, 1)?)?,
                    value_f64(exchange, "high", row_field(exchange, row, 2)?)?,
                    value_f64(exchange, "low", row_field(exchange, row, 3)?)?,
                    value_f64(exchange, "close", row_field(exchange, row, 4)?)?,
                    value_f64(exchange, "volume", row_field(exchange, row, 5)?)?,
                    value_timestamp(exchange, row_field(exchange, row, 0)?, true)?,
                ))
            })
            .collect()
    }
}
