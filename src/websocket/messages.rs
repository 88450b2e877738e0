//! WebSocket Message Types
//!
//! Messages exchanged with the dashboard page over `/ws`.

use serde::{Deserialize, Serialize};

use crate::dispatch::OutputUpdate;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
    /// Outputs recomputed by a timer trigger
    Update {
        /// Timer that fired
        interval: String,
        /// Tick counter of the live feed
        seq: u64,
        outputs: Vec<OutputUpdate>,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}
