//! # Dashboard
//!
//! Interactive analytics dashboard: demographic and economic charts, a
//! simulated live sensor feed, a text submission widget and a sortable,
//! filterable data table, wired together by reactive bindings.
//!
//! ## Modules
//!
//! - [`dataset`]: Immutable country/year table
//! - [`live`]: Bounded live buffer and its periodic generator
//! - [`chart`]: Figure construction
//! - [`layout`]: Declarative widget tree
//! - [`bindings`]: Pure functions from inputs to outputs, and their declarations
//! - [`dispatch`]: Runs the bindings whose triggers fired
//! - [`api`]: HTTP server with Axum
//! - [`websocket`]: Timer-driven updates pushed to open pages
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dashboard::bindings::main_chart;
//! use dashboard::chart::ChartKind;
//! use dashboard::dataset::Dataset;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Dataset::embedded()?;
//!
//!     let figure = main_chart(&dataset, "India", ChartKind::Bar);
//!     println!("{}: {} points", figure.title(), figure.point_count());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bindings;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod dispatch;
pub mod layout;
pub mod live;
pub mod websocket;

// Re-export top-level types for convenience
pub use dataset::{Dataset, DatasetError, DatasetSource, Row};

pub use live::{FeedConfig, LiveBuffer, LiveFeed, LiveTick, Sample};

pub use chart::{ChartKind, Figure};

pub use layout::{Component, Layout, PropId};

pub use bindings::{Binding, BindingError, BindingRegistry, RegistryError, Trigger};

pub use dispatch::{DispatchError, Dispatcher, OutputUpdate, UpdateRequest, UpdateResponse};

pub use api::{build_router, serve_shared, ApiError, AppState};

pub use websocket::{ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage};

pub use config::{
    Config, ConfigError, DatasetConfig, LiveConfig, LoggingConfig, ServerConfig,
};
