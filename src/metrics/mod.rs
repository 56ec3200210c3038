//! Prometheus metrics for the HTTP surface and venue fetches

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::models::market::Exchange;

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub venue_requests_total: IntCounterVec,
    pub comparisons_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let venue_requests_total = IntCounterVec::new(
            Opts::new(
                "venue_requests_total",
                "Exchange REST calls by exchange, operation and outcome",
            ),
            &["exchange", "operation", "outcome"],
        )?;
        let comparisons_total = IntCounterVec::new(
            Opts::new("comparisons_total", "Venue comparisons by outcome"),
            &["outcome"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(venue_requests_total.clone()))?;
        registry.register(Box::new(comparisons_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            venue_requests_total,
            comparisons_total,
        })
    }

    pub fn record_venue_request(&self, exchange: Exchange, operation: &str, success: bool) {
        let outcome = if success { "ok" } else { "error" };
        self.venue_requests_total
            .with_label_values(&[exchange.as_str(), operation, outcome])
            .inc();
    }

    pub fn record_comparison(&self, outcome: &str) {
        self.comparisons_total.with_label_values(&[outcome]).inc();
    }

    /// Render all metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
