//! Error types for venue fetches and market analysis

use crate::models::comparison::VenueFailure;
use crate::models::market::{Exchange, Timeframe};
use thiserror::Error;

pub type FetchResult<T> = Result<T, FetchError>;

/// Failure talking to a single exchange
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("{exchange}: network error: {message}")]
    Network { exchange: Exchange, message: String },

    #[error("{exchange}: HTTP {status}: {message}")]
    Api {
        exchange: Exchange,
        status: u16,
        message: String,
    },

    #[error("{exchange}: symbol {symbol} is not supported")]
    UnsupportedSymbol { exchange: Exchange, symbol: String },

    #[error("{exchange}: timeframe {timeframe} is not supported")]
    UnsupportedTimeframe {
        exchange: Exchange,
        timeframe: Timeframe,
    },

    #[error("{exchange}: malformed response: {message}")]
    Malformed { exchange: Exchange, message: String },

    #[error("{exchange}: exchange is not configured")]
    NotConfigured { exchange: Exchange },
}

impl FetchError {
    pub fn exchange(&self) -> Exchange {
        match self {
            Self::Network { exchange, .. }
            | Self::Api { exchange, .. }
            | Self::UnsupportedSymbol { exchange, .. }
            | Self::UnsupportedTimeframe { exchange, .. }
            | Self::Malformed { exchange, .. }
            | Self::NotConfigured { exchange } => *exchange,
        }
    }

    pub fn network(exchange: Exchange, err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed {
                exchange,
                message: err.to_string(),
            }
        } else {
            Self::Network {
                exchange,
                message: err.to_string(),
            }
        }
    }

    pub fn malformed(exchange: Exchange, message: impl Into<String>) -> Self {
        Self::Malformed {
            exchange,
            message: message.into(),
        }
    }

    pub fn parse(exchange: Exchange, err: serde_json::Error) -> Self {
        Self::malformed(exchange, err.to_string())
    }
}

/// Errors surfaced to callers of the comparison and indicator operations
#[derive(Debug, Clone, Error)]
pub enum MarketError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no data available for {symbol}: {reason}")]
    NoData {
        symbol: String,
        reason: String,
        failures: Vec<VenueFailure>,
    },

    #[error("invalid symbol: {0:?}")]
    InvalidSymbol(String),
}

impl MarketError {
    pub fn no_data(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NoData {
            symbol: symbol.into(),
            reason: reason.into(),
            failures: Vec::new(),
        }
    }
}
