use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::market::Exchange;

/// Bollinger Bands over one whole window (not rolling)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub closes: Vec<f64>,
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
    pub period: u32,
    pub std_dev: f64,
}

/// Single MACD reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD, signal and histogram aligned one-to-one with `timestamps`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    pub timestamps: Vec<DateTime<Utc>>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
    pub period: (u32, u32, u32),
}

impl MacdSeries {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Reading for the most recent bar
    pub fn latest(&self) -> Option<MacdIndicator> {
        Some(MacdIndicator {
            macd: *self.macd.last()?,
            signal: *self.signal.last()?,
            histogram: *self.histogram.last()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BollingerReport {
    pub exchange: Exchange,
    pub bands: BollingerBands,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdReport {
    pub exchange: Exchange,
    pub series: MacdSeries,
}
