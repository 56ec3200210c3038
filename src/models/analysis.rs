use serde::{Deserialize, Serialize};

use super::comparison::PriceComparison;
use super::indicators::{BollingerReport, MacdReport};
use super::market::{Symbol, Timeframe};

/// Window sizes and indicator parameters used by the analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisParams {
    pub timeframe: Timeframe,
    pub bollinger_bars: usize,
    pub bollinger_period: u32,
    pub bollinger_std_dev: f64,
    pub macd_bars: usize,
    pub macd_fast: u32,
    pub macd_slow: u32,
    pub macd_signal: u32,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::OneDay,
            bollinger_bars: 20,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            macd_bars: 100,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

/// Everything produced for one symbol request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: Symbol,
    pub comparison: PriceComparison,
    pub cheapest_bands: BollingerReport,
    pub most_expensive_bands: BollingerReport,
    pub most_expensive_macd: MacdReport,
}
