//! Fixed-interval request pacing.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Spaces consecutive requests at least `interval` apart.
///
/// Waiters queue on the mutex, so concurrent callers are released one at a
/// time in order. A zero interval disables pacing.
#[derive(Debug)]
pub struct RequestPacer {
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until the next request slot. The first call returns immediately.
    pub async fn wait(&self) {
        if self.interval.is_zero() {
            return;
        }
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let next_slot = previous + self.interval;
            if next_slot > Instant::now() {
                sleep_until(next_slot).await;
            }
        }
        *last = Some(Instant::now());
    }
}
