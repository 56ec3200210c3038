use serde::{Deserialize, Serialize};

use super::market::{Exchange, Symbol};

/// Last traded price observed on one venue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VenueQuote {
    pub exchange: Exchange,
    pub price: f64,
}

/// A venue that could not be queried during a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueFailure {
    pub exchange: Exchange,
    pub error: String,
}

/// Outcome of comparing one symbol across venues.
///
/// Only built when at least one venue answered, so `cheapest.price <=
/// most_expensive.price` always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceComparison {
    pub symbol: Symbol,
    pub cheapest: VenueQuote,
    pub most_expensive: VenueQuote,
    pub quotes: Vec<VenueQuote>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<VenueFailure>,
}

impl PriceComparison {
    /// Absolute spread between the most expensive and cheapest venue
    pub fn spread(&self) -> f64 {
        self.most_expensive.price - self.cheapest.price
    }

    /// True when some venues failed but the comparison still produced a result
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}
