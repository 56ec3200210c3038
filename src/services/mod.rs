//! Exchange integrations and the services built on top of them

pub mod analysis;
pub mod comparator;
pub mod exchanges;
pub mod market_data;
pub mod registry;

pub use analysis::MarketAnalyzer;
pub use comparator::VenueComparator;
pub use market_data::MarketDataProvider;
pub use registry::ExchangeRegistry;
