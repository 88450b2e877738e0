//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::bindings::{BindingRegistry, RegistryError};
use crate::config::ServerConfig;
use crate::dataset::Dataset;
use crate::dispatch::Dispatcher;
use crate::layout::Layout;
use crate::live::LiveFeed;
use crate::websocket::{ConnectionHub, HubConfig};

/// Shared application state for all handlers
pub struct AppState {
    /// Immutable table behind every non-live chart
    pub dataset: Arc<Dataset>,
    /// Page declared at startup
    pub layout: Arc<Layout>,
    /// Runs bindings for update requests and timer ticks
    pub dispatcher: Arc<Dispatcher>,
    /// Live sensor feed
    pub feed: Arc<LiveFeed>,
    /// WebSocket connection hub for timer-driven updates
    pub ws_hub: Arc<ConnectionHub>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Build the page and its bindings.
    ///
    /// Fails if the bindings do not fit the layout.
    pub fn new(
        dataset: Arc<Dataset>,
        feed: Arc<LiveFeed>,
        config: ServerConfig,
    ) -> Result<Self, RegistryError> {
        Self::with_registry(dataset, feed, config, BindingRegistry::standard())
    }

    /// Build with a custom binding registry
    pub fn with_registry(
        dataset: Arc<Dataset>,
        feed: Arc<LiveFeed>,
        config: ServerConfig,
        registry: BindingRegistry,
    ) -> Result<Self, RegistryError> {
        let layout = Layout::build(&dataset, feed.period());
        registry.validate(&layout)?;

        let dispatcher = Dispatcher::new(
            registry,
            Arc::clone(&dataset),
            feed.buffer().clone(),
            config.debug,
        );
        let hub_config = HubConfig {
            max_connections: config.max_ws_connections,
        };

        Ok(Self {
            dataset,
            layout: Arc::new(layout),
            dispatcher: Arc::new(dispatcher),
            feed,
            ws_hub: Arc::new(ConnectionHub::new(hub_config)),
            config: Arc::new(config),
            start_time: Instant::now(),
        })
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get WebSocket connection count
    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }
}
