//! Live Feed Generator
//!
//! Appends one random sample to the shared buffer every period and notifies
//! subscribers so timer-driven outputs can refresh.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};

use super::buffer::{LiveBuffer, Sample};

/// Live feed settings
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Time between samples
    pub period: Duration,
    /// Samples retained in the buffer
    pub capacity: usize,
    /// Half-open range of generated values
    pub values: Range<i64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(2000),
            capacity: super::buffer::DEFAULT_CAPACITY,
            values: 50..200,
        }
    }
}

/// Notification sent after each sample is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveTick {
    /// Tick counter, starting at 1
    pub seq: u64,
    pub sample: Sample,
}

/// Periodic producer of simulated sensor samples
pub struct LiveFeed {
    buffer: LiveBuffer,
    config: FeedConfig,
    ticks: broadcast::Sender<LiveTick>,
    seq: AtomicU64,
    last_tick: Mutex<Option<Instant>>,
}

impl LiveFeed {
    pub fn new(config: FeedConfig) -> Self {
        let (ticks, _) = broadcast::channel(64);
        let values = if config.values.is_empty() {
            tracing::warn!(range = ?config.values, "Empty live value range, using defaults");
            FeedConfig::default().values
        } else {
            config.values.clone()
        };

        Self {
            buffer: LiveBuffer::new(config.capacity),
            config: FeedConfig {
                values,
                // tokio intervals panic on a zero period
                period: config.period.max(Duration::from_millis(1)),
                ..config
            },
            ticks,
            seq: AtomicU64::new(0),
            last_tick: Mutex::new(None),
        }
    }

    /// Handle to the shared buffer
    pub fn buffer(&self) -> &LiveBuffer {
        &self.buffer
    }

    pub fn period(&self) -> Duration {
        self.config.period
    }

    /// Receive a notification after every tick
    pub fn subscribe(&self) -> broadcast::Receiver<LiveTick> {
        self.ticks.subscribe()
    }

    /// Number of ticks produced so far
    pub fn ticks_produced(&self) -> u64 {
        self.seq.load(Ordering::Relaxed)
    }

    /// Time since the most recent tick, `None` before the first one
    pub fn since_last_tick(&self) -> Option<Duration> {
        let last = *self.last_tick.lock().unwrap_or_else(|e| e.into_inner());
        last.map(|at| at.elapsed())
    }

    /// Generate, store and announce one sample
    pub async fn tick_with<R: Rng>(&self, rng: &mut R) -> LiveTick {
        let sample = Sample::new(Utc::now(), rng.gen_range(self.config.values.clone()));
        self.buffer.append(sample).await;
        *self.last_tick.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());

        let tick = LiveTick {
            seq: self.seq.fetch_add(1, Ordering::Relaxed) + 1,
            sample,
        };

        if self.ticks.send(tick).is_err() {
            tracing::trace!(seq = tick.seq, "No live subscribers");
        }
        tick
    }

    /// Spawn the background generator. It runs until the handle is aborted.
    pub fn start(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let feed = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = interval(feed.config.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick completes immediately
            ticker.tick().await;

            tracing::info!(
                period_ms = feed.config.period.as_millis() as u64,
                capacity = feed.buffer.capacity(),
                "Live feed started"
            );

            let mut rng = StdRng::from_entropy();
            loop {
                ticker.tick().await;
                let tick = feed.tick_with(&mut rng).await;
                tracing::trace!(seq = tick.seq, value = tick.sample.value, "Live sample");
            }
        })
    }
}
