//! Dashboard HTTP API
//!
//! Serves the dashboard page and the endpoints its client script talks to,
//! built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard page
//! - `GET /_dash-layout` - Widget tree as JSON
//! - `GET /_dash-dependencies` - Which inputs trigger which outputs
//!
//! ## Updates
//! - `POST /_dash-update-component` - Recompute outputs after input changes
//! - `GET /ws` - Timer-driven updates pushed on each live-feed tick
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use dashboard::api::{serve_shared, AppState};
//! use dashboard::config::ServerConfig;
//! use dashboard::dataset::Dataset;
//! use dashboard::live::{FeedConfig, LiveFeed};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Arc::new(Dataset::embedded()?);
//!     let feed = Arc::new(LiveFeed::new(FeedConfig::default()));
//!     let config = ServerConfig::default();
//!
//!     let state = AppState::new(dataset, feed, config.clone())?;
//!     serve_shared(Arc::new(state), &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::websocket::websocket_handler;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    build_router_shared(Arc::new(state))
}

/// Build the router around already shared state
pub fn build_router_shared(state: Arc<AppState>) -> Router {
    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    Router::new()
        .route("/", get(routes::page::index))
        .route("/_dash-layout", get(routes::page::layout))
        .route("/_dash-dependencies", get(routes::page::dependencies))
        .route("/_dash-update-component", post(routes::update::update_component))
        .route("/ws", get(websocket_handler))
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server and run until a shutdown signal arrives.
///
/// Binding the listen address is the only fatal error.
pub async fn serve_shared(state: Arc<AppState>, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router_shared(state);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!("Dashboard listening on http://{}", local_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
