//! Bollinger Bands indicator

use crate::common::math;
use crate::models::indicators::BollingerBands;
use crate::models::market::Candle;

/// Calculate Bollinger Bands over a single window
///
/// The window is the closes of the last `period` candles, or all of them when
/// fewer are available. Produces one band triple for the whole window:
///
/// Middle Band = SMA(window)
/// Upper Band = Middle + (std_dev * population standard deviation)
/// Lower Band = Middle - (std_dev * population standard deviation)
pub fn calculate_bollinger_bands(
    candles: &[Candle],
    period: u32,
    std_dev: f64,
) -> Option<BollingerBands> {
    let window = candles.len().min(period as usize);
    if window == 0 {
        return None;
    }

    let closes: Vec<f64> = candles[candles.len() - window..]
        .iter()
        .map(|c| c.close)
        .collect();
    let middle = math::sma(&closes, window)?;
    let std = math::standard_deviation(&closes, window)?;

    Some(BollingerBands {
        upper: middle + (std_dev * std),
        middle,
        lower: middle - (std_dev * std),
        closes,
        period,
        std_dev,
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(candles: &[Candle]) -> Option<BollingerBands> {
    calculate_bollinger_bands(candles, 20, 2.0)
}
