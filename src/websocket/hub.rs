//! WebSocket Connection Hub
//!
//! Tracks open dashboard connections and fans server messages out to them.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::ServerMessage;

/// Unique identifier for a WebSocket connection
pub type ConnectionId = String;

/// Configuration for the connection hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent connections
    pub max_connections: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 1000,
        }
    }
}

/// Manages all WebSocket connections
pub struct ConnectionHub {
    connections: Arc<RwLock<HashMap<ConnectionId, mpsc::UnboundedSender<ServerMessage>>>>,
    config: HubConfig,
}

impl ConnectionHub {
    /// Create a new connection hub
    pub fn new(config: HubConfig) -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Register a new WebSocket connection
    ///
    /// Returns the connection ID on success, or an error if the connection
    /// limit has been reached.
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<ConnectionId, HubError> {
        let mut connections = self.connections.write().await;
        if connections.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections(self.config.max_connections));
        }

        let id = Uuid::new_v4().to_string();
        connections.insert(id.clone(), sender);

        tracing::info!(connection_id = %id, "WebSocket connected");
        Ok(id)
    }

    /// Unregister a connection
    pub async fn unregister(&self, id: &str) {
        self.connections.write().await.remove(id);
        tracing::info!(connection_id = %id, "WebSocket disconnected");
    }

    /// Send a message to every connection. Returns the number reached.
    pub async fn broadcast(&self, message: &ServerMessage) -> usize {
        let connections = self.connections.read().await;

        let mut sent_count = 0;
        for sender in connections.values() {
            if sender.send(message.clone()).is_ok() {
                sent_count += 1;
            }
        }

        if sent_count > 0 {
            tracing::trace!(connections = sent_count, "Broadcast message");
        }
        sent_count
    }

    /// Send a message directly to a specific connection
    pub async fn send_to(&self, id: &str, message: ServerMessage) -> Result<(), HubError> {
        let connections = self.connections.read().await;
        let sender = connections.get(id).ok_or(HubError::ConnectionNotFound)?;

        sender.send(message).map_err(|_| HubError::SendFailed)
    }

    /// Get the current connection count
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

/// Errors that can occur in the connection hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many connections (limit: {0})")]
    TooManyConnections(usize),

    #[error("Connection not found")]
    ConnectionNotFound,

    #[error("Failed to send message")]
    SendFailed,
}
