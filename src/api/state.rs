//! Application State
//!
//! Shared state accessible by all handlers. Pages are rebuilt from the
//! configuration on every request, so nothing here is mutable.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;

/// Shared application state for all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<Config>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
