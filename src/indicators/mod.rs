//! Technical indicators computed from OHLCV candles.
//!
//! All calculators are pure functions of their input slice.

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use momentum::{calculate_macd, calculate_macd_default};
pub use trend::{calculate_ema, calculate_ema_series};
pub use volatility::{calculate_bollinger_bands, calculate_bollinger_bands_default};
