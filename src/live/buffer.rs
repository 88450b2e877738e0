//! Bounded live-sample buffer
//!
//! Writers replace the stored snapshot on every append; readers clone the
//! `Arc` and release the lock immediately.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Default number of samples retained
pub const DEFAULT_CAPACITY: usize = 15;

/// One simulated sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: i64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, value: i64) -> Self {
        Self { timestamp, value }
    }
}

/// Lock-guarded ring buffer of the most recent samples
#[derive(Debug, Clone)]
pub struct LiveBuffer {
    inner: Arc<RwLock<Arc<[Sample]>>>,
    capacity: usize,
}

impl LiveBuffer {
    /// Create an empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::from(Vec::<Sample>::new()))),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a sample, evicting the oldest entries beyond capacity
    pub async fn append(&self, sample: Sample) {
        let mut guard = self.inner.write().await;

        let current: &[Sample] = &guard;
        let keep = current.len().min(self.capacity - 1);
        let mut next = Vec::with_capacity(keep + 1);
        next.extend_from_slice(&current[current.len() - keep..]);
        next.push(sample);

        *guard = Arc::from(next);
    }

    /// Immutable copy of the current contents, oldest first
    pub async fn snapshot(&self) -> Arc<[Sample]> {
        Arc::clone(&*self.inner.read().await)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for LiveBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
