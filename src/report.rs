//! Human-readable summaries and chart titles for an analysis report.
//!
//! Presentation helpers only; the numeric results live in [`crate::models`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::analysis::AnalysisReport;
use crate::models::indicators::BollingerReport;
use crate::models::market::{Exchange, Symbol};

/// Which side of the comparison a venue was selected for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueRole {
    Cheapest,
    MostExpensive,
}

impl fmt::Display for VenueRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VenueRole::Cheapest => f.write_str("cheapest"),
            VenueRole::MostExpensive => f.write_str("most expensive"),
        }
    }
}

pub fn bollinger_title(symbol: &Symbol, exchange: Exchange, role: VenueRole) -> String {
    format!("Bollinger Bands of {} on {} ({})", symbol, exchange, role)
}

pub fn macd_title(symbol: &Symbol, exchange: Exchange, role: VenueRole) -> String {
    format!("MACD of {} on {} ({})", symbol, exchange, role)
}

pub fn comparison_title(symbol: &Symbol) -> String {
    format!("Cheapest and most expensive price of {}", symbol)
}

/// Quote currency of the pair, used as the unit in price lines
fn unit(symbol: &Symbol) -> &str {
    symbol.pair().map(|(_, quote)| quote).unwrap_or("")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandSummary {
    pub title: String,
    pub lines: Vec<String>,
}

impl BandSummary {
    fn new(symbol: &Symbol, report: &BollingerReport, role: VenueRole) -> Self {
        let unit = unit(symbol);
        let bands = &report.bands;
        Self {
            title: bollinger_title(symbol, report.exchange, role),
            lines: vec![
                format!("Summary - {} ({}):", report.exchange, role),
                format!(
                    "- Simple moving average ({} bars): {:.2} {}",
                    bands.closes.len(),
                    bands.middle,
                    unit
                ),
                format!("- Upper band: {:.2} {}", bands.upper, unit),
                format!("- Lower band: {:.2} {}", bands.lower, unit),
            ],
        }
    }
}

/// Text shown alongside the charts for one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub comparison_title: String,
    pub cheapest_line: String,
    pub most_expensive_line: String,
    pub warnings: Vec<String>,
    pub cheapest_bands: BandSummary,
    pub most_expensive_bands: BandSummary,
    pub macd_title: String,
}

impl AnalysisSummary {
    pub fn from_report(report: &AnalysisReport) -> Self {
        let symbol = &report.symbol;
        let unit = unit(symbol);
        let comparison = &report.comparison;

        Self {
            comparison_title: comparison_title(symbol),
            cheapest_line: format!(
                "Cheapest price: {} {} on {}",
                comparison.cheapest.price, unit, comparison.cheapest.exchange
            ),
            most_expensive_line: format!(
                "Most expensive price: {} {} on {}",
                comparison.most_expensive.price, unit, comparison.most_expensive.exchange
            ),
            warnings: comparison
                .failures
                .iter()
                .map(|f| format!("Could not fetch price on {}: {}", f.exchange, f.error))
                .collect(),
            cheapest_bands: BandSummary::new(symbol, &report.cheapest_bands, VenueRole::Cheapest),
            most_expensive_bands: BandSummary::new(
                symbol,
                &report.most_expensive_bands,
                VenueRole::MostExpensive,
            ),
            macd_title: macd_title(
                symbol,
                report.most_expensive_macd.exchange,
                VenueRole::MostExpensive,
            ),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.extend(self.warnings.iter().map(|w| format!("warning: {}", w)));
        lines.push(self.cheapest_line.clone());
        lines.push(self.most_expensive_line.clone());
        lines.extend(self.cheapest_bands.lines.iter().cloned());
        lines.extend(self.most_expensive_bands.lines.iter().cloned());
        lines
    }
}

impl fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
