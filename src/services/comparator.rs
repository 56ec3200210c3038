//! Cross-venue price comparison with per-venue failure isolation

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::MarketError;
use crate::models::comparison::{PriceComparison, VenueFailure, VenueQuote};
use crate::models::market::Symbol;
use crate::services::registry::ExchangeRegistry;

pub struct VenueComparator {
    registry: Arc<ExchangeRegistry>,
}

impl VenueComparator {
    pub fn new(registry: Arc<ExchangeRegistry>) -> Self {
        Self { registry }
    }

    /// Query every venue in registry order and pick the cheapest and most
    /// expensive last price.
    ///
    /// A failing venue is logged and recorded in `failures`; the remaining
    /// venues are still queried. Extremes are only replaced on a strict
    /// improvement, so the first venue seen wins a tie. Fails with
    /// [`MarketError::NoData`] when no venue returned a price.
    pub async fn compare(&self, symbol: &Symbol) -> Result<PriceComparison, MarketError> {
        let mut quotes: Vec<VenueQuote> = Vec::new();
        let mut failures: Vec<VenueFailure> = Vec::new();
        let mut cheapest: Option<VenueQuote> = None;
        let mut most_expensive: Option<VenueQuote> = None;

        for exchange in self.registry.exchanges() {
            match self.registry.get_price(exchange, symbol).await {
                Ok(price) => {
                    let quote = VenueQuote { exchange, price };
                    if cheapest.map_or(true, |q| price < q.price) {
                        cheapest = Some(quote);
                    }
                    if most_expensive.map_or(true, |q| price > q.price) {
                        most_expensive = Some(quote);
                    }
                    quotes.push(quote);
                }
                Err(e) => {
                    warn!(
                        exchange = %exchange,
                        symbol = %symbol,
                        error = %e,
                        "Failed to fetch price, skipping venue"
                    );
                    failures.push(VenueFailure {
                        exchange,
                        error: e.to_string(),
                    });
                }
            }
        }

        let (Some(cheapest), Some(most_expensive)) = (cheapest, most_expensive) else {
            self.record("no_data");
            let reason = if failures.is_empty() {
                "no exchanges configured".to_string()
            } else {
                format!("all {} venues failed", failures.len())
            };
            return Err(MarketError::NoData {
                symbol: symbol.to_string(),
                reason,
                failures,
            });
        };

        self.record(if failures.is_empty() { "ok" } else { "degraded" });
        info!(
            symbol = %symbol,
            cheapest = %cheapest.exchange,
            cheapest_price = cheapest.price,
            most_expensive = %most_expensive.exchange,
            most_expensive_price = most_expensive.price,
            failed_venues = failures.len(),
            "Compared venues"
        );

        Ok(PriceComparison {
            symbol: symbol.clone(),
            cheapest,
            most_expensive,
            quotes,
            failures,
        })
    }

    fn record(&self, outcome: &str) {
        if let Some(metrics) = self.registry.metrics() {
            metrics.record_comparison(outcome);
        }
    }
}
