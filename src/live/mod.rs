//! Live Sensor Feed
//!
//! A simulated sensor: a background task that stores one random reading
//! every period in a bounded buffer.
//!
//! - [`LiveBuffer`]: the only state shared between the feed task and the
//!   dispatcher. Readers get immutable snapshots.
//! - [`LiveFeed`]: the producer. It also broadcasts a [`LiveTick`] after
//!   every sample, which drives timer-triggered bindings.

mod buffer;
mod feed;

pub use buffer::{LiveBuffer, Sample, DEFAULT_CAPACITY};
pub use feed::{FeedConfig, LiveFeed, LiveTick};
