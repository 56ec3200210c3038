//! Indicator analysis for the venues selected by the comparator

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::MarketError;
use crate::indicators::{calculate_bollinger_bands, calculate_macd};
use crate::models::analysis::{AnalysisParams, AnalysisReport};
use crate::models::comparison::PriceComparison;
use crate::models::indicators::{BollingerReport, MacdReport};
use crate::models::market::{Exchange, Symbol};
use crate::services::comparator::VenueComparator;
use crate::services::registry::ExchangeRegistry;

/// Stateless entry point for the per-request analysis chain.
///
/// Holds only immutable configuration and the shared registry, so one
/// instance can serve concurrent requests.
pub struct MarketAnalyzer {
    registry: Arc<ExchangeRegistry>,
    comparator: VenueComparator,
    params: AnalysisParams,
}

impl MarketAnalyzer {
    pub fn new(registry: Arc<ExchangeRegistry>) -> Self {
        Self::with_params(registry, AnalysisParams::default())
    }

    pub fn with_params(registry: Arc<ExchangeRegistry>, params: AnalysisParams) -> Self {
        Self {
            comparator: VenueComparator::new(registry.clone()),
            registry,
            params,
        }
    }

    pub fn registry(&self) -> &Arc<ExchangeRegistry> {
        &self.registry
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    pub async fn compare(&self, symbol: &Symbol) -> Result<PriceComparison, MarketError> {
        self.comparator.compare(symbol).await
    }

    /// Single-window Bollinger Bands over the latest bars of one venue
    pub async fn bollinger(
        &self,
        exchange: Exchange,
        symbol: &Symbol,
    ) -> Result<BollingerReport, MarketError> {
        let candles = self
            .registry
            .get_ohlcv(exchange, symbol, self.params.timeframe, self.params.bollinger_bars)
            .await?;
        if candles.len() < self.params.bollinger_bars {
            debug!(
                exchange = %exchange,
                symbol = %symbol,
                received = candles.len(),
                requested = self.params.bollinger_bars,
                "Short history, computing bands over available bars"
            );
        }

        let bands = calculate_bollinger_bands(
            &candles,
            self.params.bollinger_period,
            self.params.bollinger_std_dev,
        )
        .ok_or_else(|| {
            MarketError::no_data(
                symbol.as_str(),
                format!("{} returned no candles for Bollinger Bands", exchange),
            )
        })?;

        Ok(BollingerReport { exchange, bands })
    }

    /// MACD, signal and histogram over the latest bars of one venue
    pub async fn macd(
        &self,
        exchange: Exchange,
        symbol: &Symbol,
    ) -> Result<MacdReport, MarketError> {
        let candles = self
            .registry
            .get_ohlcv(exchange, symbol, self.params.timeframe, self.params.macd_bars)
            .await?;

        let series = calculate_macd(
            &candles,
            self.params.macd_fast,
            self.params.macd_slow,
            self.params.macd_signal,
        )
        .ok_or_else(|| {
            MarketError::no_data(
                symbol.as_str(),
                format!("{} returned no candles for MACD", exchange),
            )
        })?;

        Ok(MacdReport { exchange, series })
    }

    /// Compare venues, then compute Bollinger Bands for the cheapest and most
    /// expensive venue and MACD for the most expensive one.
    ///
    /// Stops before any indicator fetch when the comparison has no data.
    /// Indicator failures are not isolated and propagate to the caller.
    pub async fn analyze(&self, symbol: &Symbol) -> Result<AnalysisReport, MarketError> {
        let comparison = self.compare(symbol).await?;

        let cheapest_bands = self.bollinger(comparison.cheapest.exchange, symbol).await?;
        let most_expensive_bands = self
            .bollinger(comparison.most_expensive.exchange, symbol)
            .await?;
        let most_expensive_macd = self.macd(comparison.most_expensive.exchange, symbol).await?;

        info!(
            symbol = %symbol,
            cheapest = %comparison.cheapest.exchange,
            most_expensive = %comparison.most_expensive.exchange,
            macd_bars = most_expensive_macd.series.len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            symbol: symbol.clone(),
            comparison,
            cheapest_bands,
            most_expensive_bands,
            most_expensive_macd,
        })
    }
}
