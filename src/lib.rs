//! Cross-venue price comparison and indicator analysis for crypto pairs.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod report;
pub mod services;

pub use error::{FetchError, MarketError};
