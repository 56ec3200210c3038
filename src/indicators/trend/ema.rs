//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::market::Candle;

/// EMA of closing prices for every candle, seeded on the first close
pub fn calculate_ema_series(candles: &[Candle], span: u32) -> Vec<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::ema_series(&closes, span as usize)
}

/// EMA value at the most recent candle
pub fn calculate_ema(candles: &[Candle], span: u32) -> Option<f64> {
    calculate_ema_series(candles, span).last().copied()
}
