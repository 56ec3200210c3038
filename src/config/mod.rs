//! Environment-driven configuration
//!
//! Values are read once by the binaries. Library operations take the
//! resolved [`AppConfig`] (or explicit arguments) and never touch the
//! environment themselves.

use std::env;
use thiserror::Error;
use url::Url;

use crate::models::market::Exchange;
use crate::services::exchanges::{binance, bitstamp, coinbase, kraken};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_USER_AGENT: &str = concat!("pricescout/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?} is not a valid URL ({reason})")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid PORT: {0:?}")]
    InvalidPort(String),

    #[error("invalid EXCHANGES entry: {0}")]
    UnknownExchange(String),

    #[error("EXCHANGES must name at least one exchange")]
    NoExchanges,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Public REST base URLs for each venue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeEndpoints {
    pub binance: String,
    pub coinbase: String,
    pub kraken: String,
    pub bitstamp: String,
}

impl Default for ExchangeEndpoints {
    fn default() -> Self {
        Self {
            binance: binance::DEFAULT_BASE_URL.to_string(),
            coinbase: coinbase::DEFAULT_BASE_URL.to_string(),
            kraken: kraken::DEFAULT_BASE_URL.to_string(),
            bitstamp: bitstamp::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ExchangeEndpoints {
    pub fn get(&self, exchange: Exchange) -> &str {
        match exchange {
            Exchange::Binance => &self.binance,
            Exchange::Coinbase => &self.coinbase,
            Exchange::Kraken => &self.kraken,
            Exchange::Bitstamp => &self.bitstamp,
        }
    }

    /// Same base URL for every venue (used to point all clients at one mock server)
    pub fn uniform(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            binance: base_url.clone(),
            coinbase: base_url.clone(),
            kraken: base_url.clone(),
            bitstamp: base_url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub port: u16,
    /// Venues to compare, in iteration (tie-break) order
    pub exchanges: Vec<Exchange>,
    pub endpoints: ExchangeEndpoints,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: DEFAULT_PORT,
            exchanges: Exchange::ALL.to_vec(),
            endpoints: ExchangeEndpoints::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    /// Build configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let exchanges = match lookup("EXCHANGES") {
            Some(raw) => parse_exchanges(&raw)?,
            None => defaults.exchanges,
        };

        let endpoints = ExchangeEndpoints {
            binance: endpoint(&lookup, "BINANCE_API_URL", defaults.endpoints.binance)?,
            coinbase: endpoint(&lookup, "COINBASE_API_URL", defaults.endpoints.coinbase)?,
            kraken: endpoint(&lookup, "KRAKEN_API_URL", defaults.endpoints.kraken)?,
            bitstamp: endpoint(&lookup, "BITSTAMP_API_URL", defaults.endpoints.bitstamp)?,
        };

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            exchanges,
            endpoints,
            user_agent: lookup("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }
}

/// Parse a comma separated venue list, keeping order and dropping duplicates
pub fn parse_exchanges(raw: &str) -> Result<Vec<Exchange>, ConfigError> {
    let mut exchanges = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let exchange: Exchange = part.parse().map_err(ConfigError::UnknownExchange)?;
        if !exchanges.contains(&exchange) {
            exchanges.push(exchange);
        }
    }
    if exchanges.is_empty() {
        return Err(ConfigError::NoExchanges);
    }
    Ok(exchanges)
}

fn endpoint<F>(lookup: &F, name: &'static str, default: String) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(default);
    };
    Url::parse(&value).map_err(|e| ConfigError::InvalidUrl {
        name,
        value: value.clone(),
        reason: e.to_string(),
    })?;
    Ok(value.trim_end_matches('/').to_string())
}
