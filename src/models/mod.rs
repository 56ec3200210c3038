//! Shared data models spanning the service layers.

pub mod analysis;
pub mod comparison;
pub mod indicators;
pub mod market;

pub use analysis::{AnalysisParams, AnalysisReport};
pub use comparison::{PriceComparison, VenueFailure, VenueQuote};
pub use indicators::{BollingerBands, BollingerReport, MacdIndicator, MacdReport, MacdSeries};
pub use market::{Candle, Exchange, Symbol, Timeframe};
