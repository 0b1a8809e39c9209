//! REST API server for the price monitor
//!
//! ## Architecture
//!
//! - **Axum** web framework with tower-http middleware (trace, CORS)
//! - **Session registry** injected through shared state, never global
//! - **One-shot paths** hit the feed client directly; session paths only read
//!   registry state
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/tokens` - List all available tokens
//! - `GET /api/price/{symbol}` - Current price for any token
//! - `POST /api/check` - Check price vs threshold (single)
//! - `POST /api/monitor/start` - Start monitoring session
//! - `GET /api/monitor/{id}` - Monitoring session status
//! - `POST /api/monitor/{id}/stop` - Stop monitoring session
//! - `GET /api/monitor/sessions` - List all monitoring sessions

pub mod error;
pub mod routes;
pub mod state;
pub mod types;
pub mod utils;

pub use error::{ApiError, ApiResult};
pub use state::ApiState;
pub use types::{
    CheckResponse, HealthResponse, MonitorStatusResponse, PriceResponse, SessionsResponse,
    StartMonitorResponse, StopMonitorResponse, TokensResponse,
};

use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use tracing::info;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address (e.g., "0.0.0.0:8080")
    pub bind_addr: SocketAddr,

    /// Enable CORS for browser clients
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().unwrap(),
            enable_cors: true,
        }
    }
}

/// Build the application router.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/tokens", get(routes::tokens::list_tokens))
        // Symbols contain a slash ("BTC/USD"), so the price path is a wildcard.
        .route("/api/price/*symbol", get(routes::price::get_price))
        .route("/api/check", post(routes::price::check_threshold))
        .route("/api/monitor/start", post(routes::monitor::start_monitor))
        .route("/api/monitor/sessions", get(routes::monitor::list_sessions))
        .route("/api/monitor/:id", get(routes::monitor::get_monitor_status))
        .route("/api/monitor/:id/stop", post(routes::monitor::stop_monitor))
        .with_state(state)
}

/// Spawn the API server
///
/// This starts an Axum HTTP server in a background task.
/// Returns the server's local address.
pub async fn spawn_api_server(config: ApiConfig, state: ApiState) -> anyhow::Result<SocketAddr> {
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::trace::TraceLayer;

    info!("starting API server on {}", config.bind_addr);

    let mut app = build_router(state).layer(TraceLayer::new_for_http());

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;

    info!("API server listening on {}", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("API server error: {}", e);
        }
    });

    Ok(addr)
}
