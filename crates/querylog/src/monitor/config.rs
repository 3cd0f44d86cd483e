use std::time::Duration;

/// Configuration for the events a [`QueryTimingProxy`](super::QueryTimingProxy) emits.
///
/// None of these settings change what is recorded in the query log; they only
/// control `tracing` output.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Recorded queries at or above this duration emit a slow-query warning.
    pub slow_query_threshold: Option<Duration>,
    /// Truncate SQL in emitted events (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
    /// Emit a debug event for every recorded query.
    pub tracing_enabled: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            slow_query_threshold: None,
            max_sql_length: Some(200),
            tracing_enabled: true,
        }
    }
}

impl ProxyConfig {
    /// Create a new configuration with defaults (per-query events on, no slow threshold).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slow query threshold.
    pub fn with_slow_query_threshold(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    /// Set maximum SQL length to display.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    /// Emit per-query debug events.
    pub fn enable_tracing(mut self) -> Self {
        self.tracing_enabled = true;
        self
    }

    /// Stop emitting per-query debug events. Slow-query warnings are unaffected.
    pub fn disable_tracing(mut self) -> Self {
        self.tracing_enabled = false;
        self
    }

    /// Whether a query of this duration counts as slow.
    pub fn is_slow(&self, elapsed: Duration) -> bool {
        self.slow_query_threshold
            .is_some_and(|threshold| elapsed >= threshold)
    }
}
