//! pricescout API Server
//!
//! HTTP API exposing venue comparison and indicator analysis.
//! Holds no per-request state and can be horizontally scaled.

use dotenvy::dotenv;
use pricescout::config::AppConfig;
use pricescout::core::http::start_server;
use pricescout::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let config = AppConfig::from_env()?;
    logging::init_logging(&config.environment);

    info!("Starting pricescout API Server");
    info!(environment = %config.environment, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(exchanges = ?config.exchanges, "Comparing exchanges");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    // Graceful shutdown
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
