//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use std::time::Duration;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once the dataset is loaded.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.dataset.is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let live_samples = state.feed.buffer().len().await;
    let live_ticks = state.feed.ticks_produced();

    let feed_stalled = is_feed_stalled(
        state.feed.since_last_tick(),
        state.start_time.elapsed(),
        state.feed.period(),
    );

    Json(HealthResponse {
        status: if feed_stalled { "degraded" } else { "healthy" }.to_string(),
        dataset_rows: state.dataset.len(),
        countries: state.dataset.countries().len(),
        live_samples,
        live_ticks,
        ws_connections: state.ws_connection_count().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// A feed is stalled once three periods pass without a tick, counting from
/// startup until the first tick arrives.
fn is_feed_stalled(since_last_tick: Option<Duration>, uptime: Duration, period: Duration) -> bool {
    since_last_tick.unwrap_or(uptime) > period * 3
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_secs(2);

    #[test]
    fn test_feed_not_stalled_at_startup() {
        assert!(!is_feed_stalled(None, Duration::from_secs(1), PERIOD));
    }

    #[test]
    fn test_feed_stalled_without_first_tick() {
        assert!(is_feed_stalled(None, Duration::from_secs(7), PERIOD));
    }

    #[test]
    fn test_feed_stalled_after_ticks_stop() {
        let uptime = Duration::from_secs(600);
        assert!(!is_feed_stalled(Some(Duration::from_secs(1)), uptime, PERIOD));
        assert!(is_feed_stalled(Some(Duration::from_secs(30)), uptime, PERIOD));
    }

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
