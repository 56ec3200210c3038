//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::indicators::trend::calculate_ema_series;
use crate::models::indicators::MacdSeries;
use crate::models::market::Candle;

/// Calculate the MACD series
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// Every EMA is seeded on its first input, so all three lines have one value
/// per candle.
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Option<MacdSeries> {
    if candles.is_empty() {
        return None;
    }

    let fast_ema = calculate_ema_series(candles, fast_period);
    let slow_ema = calculate_ema_series(candles, slow_period);
    let macd = math::subtract(&fast_ema, &slow_ema);
    let signal = math::ema_series(&macd, signal_period as usize);
    let histogram = math::subtract(&macd, &signal);

    Some(MacdSeries {
        timestamps: candles.iter().map(|c| c.timestamp).collect(),
        macd,
        signal,
        histogram,
        period: (fast_period, slow_period, signal_period),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(candles: &[Candle]) -> Option<MacdSeries> {
    calculate_macd(candles, 12, 26, 9)
}
