//! Public REST clients, one per supported venue

pub mod binance;
pub mod bitstamp;
pub mod coinbase;
pub mod kraken;
mod rest;

pub use binance::BinanceClient;
pub use bitstamp::BitstampClient;
pub use coinbase::CoinbaseClient;
pub use kraken::KrakenClient;

use crate::models::market::Candle;

/// Sort candles oldest first, drop duplicate timestamps and keep the last `limit`
pub fn normalize_candles(mut candles: Vec<Candle>, limit: usize) -> Vec<Candle> {
    candles.sort_by_key(|c| c.timestamp);
    candles.dedup_by_key(|c| c.timestamp);
    if candles.len() > limit {
        candles.drain(..candles.len() - limit);
    }
    candles
}
