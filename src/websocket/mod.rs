//! WebSocket Live Updates
//!
//! Pushes timer-driven outputs to open dashboard pages. Every live-feed tick
//! runs the interval bindings once and the result is broadcast to all
//! connections.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: tracks open connections
//! - **Handler**: WebSocket upgrade and per-connection message loop
//! - **Push**: feed tick → dispatcher → broadcast
//!
//! ## Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8050/ws');
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'update') applyOutputs(msg.outputs);
//! };
//! ```

mod handler;
mod hub;
mod messages;
mod push;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage};
pub use push::spawn_live_push;
