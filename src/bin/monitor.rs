//! Market Monitor
//!
//! Scans equity candidates during the trading window and posts a report to
//! Discord the first time a ticker fires a signal on a given day.

use dotenvy::dotenv;
use market_monitor::config::Config;
use market_monitor::core::bootstrap::build_scheduler;
use market_monitor::core::http::{start_server, AppState};
use market_monitor::core::scheduler::ScheduleState;
use market_monitor::core::status::status_handle;
use market_monitor::logging;
use market_monitor::metrics::Metrics;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration error, refusing to start");
            return Err(e.into());
        }
    };

    info!("Starting Market Monitor");
    info!(environment = %config.environment, "Environment");
    info!(
        volume_threshold = config.thresholds.volume_threshold,
        resistance_period = config.thresholds.resistance_period,
        bullish_factor = config.thresholds.bullish_factor,
        bearish_factor = config.thresholds.bearish_factor,
        compression_factor = config.thresholds.compression_factor,
        accumulation_factor = config.thresholds.accumulation_factor,
        "Signal thresholds"
    );

    let metrics = Arc::new(Metrics::new()?);
    let status = status_handle();

    let server_handle = config.port.map(|port| {
        let state = AppState::new(status.clone(), metrics.clone());
        tokio::spawn(async move {
            if let Err(e) = start_server(port, state).await {
                error!(error = %e, "HTTP server error");
            }
        })
    });

    let scheduler = build_scheduler(&config, metrics)?.with_status(status);

    tokio::select! {
        _ = scheduler.run(ScheduleState::new()) => {
            error!("Scheduler loop exited unexpectedly");
        }
        _ = signal::ctrl_c() => {
            info!("Shutting down Market Monitor...");
        }
    }

    if let Some(handle) = server_handle {
        handle.abort();
    }
    info!("Market Monitor stopped");

    Ok(())
}
