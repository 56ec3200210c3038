//! Unit tests for Bollinger Bands indicator

use crate::support::candles_from_closes;
use pricescout::indicators::volatility::{
    calculate_bollinger_bands, calculate_bollinger_bands_default,
};

#[test]
fn test_bollinger_bands_known_values() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let bands = calculate_bollinger_bands(&candles, 5, 2.0).unwrap();

    assert_eq!(bands.middle, 3.0);
    assert!((bands.upper - 5.8284).abs() < 1e-4);
    assert!((bands.lower - 0.1716).abs() < 1e-4);
    assert_eq!(bands.closes, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(bands.period, 5);
    assert_eq!(bands.std_dev, 2.0);
}

#[test]
fn test_bollinger_bands_are_symmetric_around_middle() {
    let candles = candles_from_closes(&[10.0, 12.0, 9.0, 14.0, 11.0, 13.0]);
    let bands = calculate_bollinger_bands(&candles, 6, 2.0).unwrap();
    let up = bands.upper - bands.middle;
    let down = bands.middle - bands.lower;
    assert!((up - down).abs() < 1e-9);
    assert!(bands.lower <= bands.middle && bands.middle <= bands.upper);
}

#[test]
fn test_bollinger_uses_most_recent_period_only() {
    let mut closes = vec![1_000.0; 5];
    closes.extend([1.0, 2.0, 3.0, 4.0, 5.0]);
    let candles = candles_from_closes(&closes);

    let bands = calculate_bollinger_bands(&candles, 5, 2.0).unwrap();
    assert_eq!(bands.middle, 3.0);
    assert_eq!(bands.closes.len(), 5);
}

#[test]
fn test_bollinger_short_history_uses_available_bars() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let bands = calculate_bollinger_bands_default(&candles).unwrap();

    assert_eq!(bands.period, 20);
    assert_eq!(bands.closes.len(), 5);
    assert_eq!(bands.middle, 3.0);
}

#[test]
fn test_bollinger_single_candle_has_zero_width() {
    let candles = candles_from_closes(&[42.0]);
    let bands = calculate_bollinger_bands_default(&candles).unwrap();
    assert_eq!(bands.upper, 42.0);
    assert_eq!(bands.lower, 42.0);
}

#[test]
fn test_bollinger_empty_candles() {
    assert!(calculate_bollinger_bands_default(&[]).is_none());
}

#[test]
fn test_bollinger_is_deterministic() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + (i as f64 * 0.37).sin() * 5.0).collect();
    let candles = candles_from_closes(&closes);

    let first = calculate_bollinger_bands_default(&candles).unwrap();
    let second = calculate_bollinger_bands_default(&candles).unwrap();
    assert_eq!(first.middle.to_bits(), second.middle.to_bits());
    assert_eq!(first.upper.to_bits(), second.upper.to_bits());
    assert_eq!(first.lower.to_bits(), second.lower.to_bits());
}
