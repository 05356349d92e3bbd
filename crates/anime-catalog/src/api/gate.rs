//! Request gate enforcing a minimum spacing between outbound calls.
//!
//! One permit per interval, no burst allowance. Callers queue on an async
//! mutex, so at most one throttle check is in progress at a time.

use crate::clock::{Clock, SystemClock};
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Spacing Jikan tolerates for anonymous clients
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1000);

static GLOBAL_GATE: Lazy<Arc<RequestGate>> =
    Lazy::new(|| Arc::new(RequestGate::new(DEFAULT_MIN_INTERVAL, Arc::new(SystemClock))));

/// Shared throttle in front of the remote catalog
#[derive(Debug)]
pub struct RequestGate {
    /// Minimum time between two permitted requests
    min_interval: Duration,
    /// Time source
    clock: Arc<dyn Clock>,
    /// When the previous request was let through
    last_permitted: Mutex<Option<Instant>>,
}

impl RequestGate {
    /// Create a gate with the given spacing and clock
    pub fn new(min_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            min_interval,
            clock,
            last_permitted: Mutex::new(None),
        }
    }

    /// Create a gate reading tokio's clock
    pub fn with_interval(min_interval: Duration) -> Self {
        Self::new(min_interval, Arc::new(SystemClock))
    }

    /// The process-wide gate with the default spacing
    pub fn global() -> Arc<RequestGate> {
        Arc::clone(&GLOBAL_GATE)
    }

    /// Configured spacing
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a request may be issued, then claim the slot
    pub async fn acquire(&self) {
        let mut last_permitted = self.last_permitted.lock().await;

        if let Some(last) = *last_permitted {
            let elapsed = self.clock.now().saturating_duration_since(last);
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                debug!(
                    wait_ms = wait_time.as_millis() as u64,
                    "Request gate: waiting for minimum interval"
                );
                self.clock.sleep(wait_time).await;
            }
        }

        *last_permitted = Some(self.clock.now());
    }

    /// When the previous request was permitted, if any
    pub async fn last_permitted(&self) -> Option<Instant> {
        *self.last_permitted.lock().await
    }
}
