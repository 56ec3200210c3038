//! Market data provider interface implemented once per venue.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::models::market::{Candle, Exchange, Symbol, Timeframe};

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Venue this provider talks to
    fn exchange(&self) -> Exchange;

    /// Last traded price for a symbol
    async fn fetch_ticker(&self, symbol: &Symbol) -> FetchResult<f64>;

    /// Recent candles in the venue's own order.
    ///
    /// `limit` is a hint; callers go through the registry, which sorts and
    /// trims the result.
    async fn fetch_ohlcv(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        limit: usize,
    ) -> FetchResult<Vec<Candle>>;
}
