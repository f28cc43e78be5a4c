//! Round-trip latency tracking for outstanding requests.
//!
//! One tracker serves every peer session speaking a given protocol kind:
//! the protocol's registration code constructs it and hands the instance to
//! its sessions. Trackers of different kinds are fully independent; there
//! is no cross-kind locking and no ambient lookup table.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Identifier of an outstanding request.
///
/// Callers are expected to generate unique ids; reusing a live id
/// overwrites that entry without touching any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl RequestId {
    /// Create a new request ID from a counter value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request-{}", self.0)
    }
}

/// Records issue timestamps of outstanding requests and resolves their
/// round-trip durations.
///
/// Entries older than the window are discarded rather than resolved, which
/// bounds memory for peers that disconnect or stop responding mid-request.
#[derive(Debug)]
pub struct LatencyTracker {
    /// Issue timestamps of requests still awaiting a response.
    pending: RwLock<HashMap<RequestId, Instant>>,
    /// Maximum age before a pending entry is discarded instead of resolved.
    window: Duration,
}

impl LatencyTracker {
    /// Create a tracker whose pending entries expire after `window`.
    pub fn new(window: Duration) -> Self {
        Self {
            pending: RwLock::new(HashMap::new()),
            window,
        }
    }

    /// Maximum age of a resolvable entry.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record that a request was issued now.
    ///
    /// Called before the request is sent. A reused id silently overwrites
    /// the previous entry.
    pub async fn begin(&self, id: RequestId) {
        self.pending.write().await.insert(id, Instant::now());
    }

    /// Resolve a request, yielding its round-trip latency.
    ///
    /// Removes the entry and returns the elapsed time since
    /// [`begin`](LatencyTracker::begin), or `None` if the id was never
    /// recorded, already resolved, or older than the window (the stale
    /// entry is discarded by this call). A `None` simply means no latency
    /// sample for that request.
    pub async fn resolve(&self, id: RequestId) -> Option<Duration> {
        let issued = self.pending.write().await.remove(&id)?;
        let elapsed = issued.elapsed();
        if elapsed > self.window {
            tracing::debug!(request = %id, ?elapsed, "request outlived the tracker window");
            return None;
        }
        Some(elapsed)
    }

    /// Sweep out entries older than the window.
    ///
    /// Returns how many were evicted. Safe to run concurrently with
    /// `begin`/`resolve` from any number of peer sessions sharing this
    /// tracker.
    pub async fn expire(&self) -> usize {
        let mut pending = self.pending.write().await;
        let before = pending.len();
        pending.retain(|_, issued| issued.elapsed() <= self.window);
        let evicted = before - pending.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = pending.len(), "expired stale request entries");
        }
        evicted
    }

    /// Number of outstanding entries.
    pub async fn pending_len(&self) -> usize {
        self.pending.read().await.len()
    }
}
