//! Coordination configuration.

use std::time::Duration;

/// Default time a peer may stay unvalidated before being dropped.
pub const DEFAULT_VALIDATION_TIMEOUT: Duration = Duration::from_secs(15);

/// Default maximum age of an outstanding request in a latency tracker.
pub const DEFAULT_TRACKER_WINDOW: Duration = Duration::from_secs(60);

/// Configuration for the peer coordination layer.
#[derive(Debug, Clone)]
pub struct P2pConfig {
    /// How long a freshly handshaken peer may remain unvalidated before the
    /// deadline fires and the connection is dropped.
    pub validation_timeout: Duration,

    /// Maximum age of an outstanding request before its latency entry is
    /// discarded instead of resolved.
    pub tracker_window: Duration,
}

impl Default for P2pConfig {
    fn default() -> Self {
        Self {
            validation_timeout: DEFAULT_VALIDATION_TIMEOUT,
            tracker_window: DEFAULT_TRACKER_WINDOW,
        }
    }
}

impl P2pConfig {
    /// Create a configuration with the default timings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the validation deadline.
    pub fn with_validation_timeout(mut self, timeout: Duration) -> Self {
        self.validation_timeout = timeout;
        self
    }

    /// Set the latency tracker window.
    pub fn with_tracker_window(mut self, window: Duration) -> Self {
        self.tracker_window = window;
        self
    }
}
