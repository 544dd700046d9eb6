//! Health, status and metrics endpoints using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::core::status::{ScannerStatus, StatusHandle};
use crate::metrics::Metrics;

const SERVICE_NAME: &str = "market-monitor";

#[derive(Clone)]
pub struct AppState {
    pub status: StatusHandle,
    pub metrics: Arc<Metrics>,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(status: StatusHandle, metrics: Arc<Metrics>) -> Self {
        Self {
            status,
            metrics,
            started_at: Arc::new(Instant::now()),
        }
    }
}

/// Liveness plus a one-line view of the scanner.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let status = state.status.read().await;
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "uptime_seconds": state.started_at.elapsed().as_secs(),
        "market_open": status.market_open(),
        "alerted_today": status.alerted_today.len(),
        "last_tick": status.last_tick,
    }))
}

/// Full scanner snapshot: phase, trading day, alerted tickers, last cycle.
pub async fn scanner_status(State(state): State<AppState>) -> Json<ScannerStatus> {
    Json(state.status.read().await.clone())
}

pub async fn metrics_export(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let elapsed = started.elapsed();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(elapsed.as_secs_f64());

    if response.status().is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %response.status(),
            duration_ms = elapsed.as_millis(),
            "HTTP request error"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(scanner_status))
        .route("/metrics", get(metrics_export))
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
                    track_requests,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    port: u16,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
