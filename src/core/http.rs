//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::AppConfig;
use crate::error::{FetchError, MarketError};
use crate::metrics::Metrics;
use crate::models::comparison::VenueFailure;
use crate::models::market::{Exchange, Symbol, Timeframe};
use crate::report::AnalysisSummary;
use crate::services::analysis::MarketAnalyzer;
use crate::services::registry::ExchangeRegistry;

const MAX_OHLCV_LIMIT: usize = 1000;
const HEALTHY: &str = "healthy";

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub analyzer: Arc<MarketAnalyzer>,
}

/// Error body returned by every `/api` route
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    NoData {
        message: String,
        failures: Vec<VenueFailure>,
    },
    BadGateway(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            Self::NoData { message, failures } => (
                StatusCode::NOT_FOUND,
                json!({ "error": message, "failures": failures }),
            ),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, json!({ "error": msg })),
        };
        (status, Json(body)).into_response()
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::UnsupportedSymbol { .. } | FetchError::NotConfigured { .. } => {
                Self::NotFound(err.to_string())
            }
            FetchError::UnsupportedTimeframe { .. } => Self::BadRequest(err.to_string()),
            _ => Self::BadGateway(err.to_string()),
        }
    }
}

impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        match err {
            MarketError::Fetch(e) => e.into(),
            MarketError::InvalidSymbol(_) => Self::BadRequest(err.to_string()),
            MarketError::NoData { ref failures, .. } => Self::NoData {
                failures: failures.clone(),
                message: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SymbolQuery {
    symbol: Option<String>,
}

impl SymbolQuery {
    fn symbol(&self) -> Result<Symbol, ApiError> {
        let raw = self.symbol.as_deref().unwrap_or_default();
        Symbol::parse(raw).ok_or_else(|| MarketError::InvalidSymbol(raw.to_string()).into())
    }
}

#[derive(Debug, Deserialize)]
pub struct OhlcvQuery {
    symbol: Option<String>,
    timeframe: Option<String>,
    limit: Option<usize>,
}

fn parse_exchange(raw: &str) -> Result<Exchange, ApiError> {
    raw.parse().map_err(ApiError::BadRequest)
}

/// Liveness with uptime
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Json(json!({
        "status": HEALTHY,
        "uptime_seconds": uptime_seconds,
        "service": "pricescout"
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Configured exchanges in comparison order
async fn list_exchanges(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "exchanges": state.analyzer.registry().exchanges() }))
}

/// Last price of a symbol on one exchange
async fn get_price(
    State(state): State<AppState>,
    Path(exchange): Path<String>,
    Query(query): Query<SymbolQuery>,
) -> Result<Json<Value>, ApiError> {
    let exchange = parse_exchange(&exchange)?;
    let symbol = query.symbol()?;
    let price = state.analyzer.registry().get_price(exchange, &symbol).await?;
    Ok(Json(json!({
        "exchange": exchange,
        "symbol": symbol,
        "price": price
    })))
}

/// Cheapest and most expensive venue for a symbol
async fn compare_prices(
    State(state): State<AppState>,
    Query(query): Query<SymbolQuery>,
) -> Result<Json<Value>, ApiError> {
    let symbol = query.symbol()?;
    let comparison = state.analyzer.compare(&symbol).await?;
    Ok(Json(json!(comparison)))
}

/// Raw candles from one exchange
async fn get_ohlcv(
    State(state): State<AppState>,
    Path(exchange): Path<String>,
    Query(query): Query<OhlcvQuery>,
) -> Result<Json<Value>, ApiError> {
    let exchange = parse_exchange(&exchange)?;
    let symbol = SymbolQuery {
        symbol: query.symbol,
    }
    .symbol()?;
    let timeframe: Timeframe = match query.timeframe.as_deref() {
        Some(raw) => raw.parse().map_err(ApiError::BadRequest)?,
        None => state.analyzer.params().timeframe,
    };
    let limit = query
        .limit
        .unwrap_or(state.analyzer.params().macd_bars)
        .clamp(1, MAX_OHLCV_LIMIT);

    let candles = state
        .analyzer
        .registry()
        .get_ohlcv(exchange, &symbol, timeframe, limit)
        .await?;
    Ok(Json(json!({
        "exchange": exchange,
        "symbol": symbol,
        "timeframe": timeframe,
        "candles": candles
    })))
}

async fn get_bollinger(
    State(state): State<AppState>,
    Path(exchange): Path<String>,
    Query(query): Query<SymbolQuery>,
) -> Result<Json<Value>, ApiError> {
    let exchange = parse_exchange(&exchange)?;
    let symbol = query.symbol()?;
    let report = state.analyzer.bollinger(exchange, &symbol).await?;
    Ok(Json(json!(report)))
}

async fn get_macd(
    State(state): State<AppState>,
    Path(exchange): Path<String>,
    Query(query): Query<SymbolQuery>,
) -> Result<Json<Value>, ApiError> {
    let exchange = parse_exchange(&exchange)?;
    let symbol = query.symbol()?;
    let report = state.analyzer.macd(exchange, &symbol).await?;
    Ok(Json(json!(report)))
}

/// Full comparison + indicator report with summary text
async fn get_analysis(
    State(state): State<AppState>,
    Query(query): Query<SymbolQuery>,
) -> Result<Json<Value>, ApiError> {
    let symbol = query.symbol()?;
    let report = state.analyzer.analyze(&symbol).await?;
    let summary = AnalysisSummary::from_report(&report);
    Ok(Json(json!({
        "report": report,
        "summary": summary
    })))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/exchanges", get(list_exchanges))
        .route("/api/price/{exchange}", get(get_price))
        .route("/api/compare", get(compare_prices))
        .route("/api/ohlcv/{exchange}", get(get_ohlcv))
        .route("/api/bollinger/{exchange}", get(get_bollinger))
        .route("/api/macd/{exchange}", get(get_macd))
        .route("/api/analysis", get(get_analysis))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    config: AppConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let metrics = Arc::new(Metrics::new()?);
    let registry = ExchangeRegistry::from_config(&config)?.with_metrics(metrics.clone());
    let analyzer = Arc::new(MarketAnalyzer::new(Arc::new(registry)));

    info!(exchanges = ?analyzer.registry().exchanges(), "Exchange registry ready");

    let state = AppState {
        metrics,
        start_time: Arc::new(Instant::now()),
        analyzer,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
