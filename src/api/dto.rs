//! Data Transfer Objects
//!
//! Response types that are not owned by another module.

use serde::Serialize;

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    pub dataset_rows: usize,
    pub countries: usize,
    pub live_samples: usize,
    pub live_ticks: u64,
    pub ws_connections: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
