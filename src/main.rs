//! One-shot price check: compares venues for a symbol and prints the summary.
//!
//! Usage: `pricescout BTC/USD` (or set `SYMBOL`).

use dotenvy::dotenv;
use pricescout::config::AppConfig;
use pricescout::logging;
use pricescout::models::Symbol;
use pricescout::report::AnalysisSummary;
use pricescout::services::{ExchangeRegistry, MarketAnalyzer};
use pricescout::MarketError;
use std::env;
use std::sync::Arc;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = AppConfig::from_env()?;
    logging::init_logging(&config.environment);

    let raw = env::args()
        .nth(1)
        .or_else(|| env::var("SYMBOL").ok())
        .unwrap_or_default();
    let Some(symbol) = Symbol::parse(&raw) else {
        return Err("please provide a crypto pair symbol, e.g. BTC/USD".into());
    };

    let registry = ExchangeRegistry::from_config(&config)?;
    let analyzer = MarketAnalyzer::new(Arc::new(registry));

    let report = match analyzer.analyze(&symbol).await {
        Ok(report) => report,
        Err(MarketError::NoData { failures, reason, .. }) => {
            for failure in &failures {
                error!(exchange = %failure.exchange, error = %failure.error, "Venue failed");
            }
            return Err(format!("no price data for {}: {}", symbol, reason).into());
        }
        Err(e) => return Err(e.into()),
    };

    let summary = AnalysisSummary::from_report(&report);
    println!("{}", summary.comparison_title);
    print!("{}", summary);
    println!("{}", summary.macd_title);
    if let Some(latest) = report.most_expensive_macd.series.latest() {
        println!(
            "- MACD: {:.4}  signal: {:.4}  histogram: {:.4}",
            latest.macd, latest.signal, latest.histogram
        );
    }

    Ok(())
}
