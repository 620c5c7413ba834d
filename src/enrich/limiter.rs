//! Origin-level request pacing
//!
//! One `RateLimiter` instance guards one upstream origin. All tasks share the
//! same instance via `Arc`, so the minimum inter-request delay is a global
//! pacing control rather than a per-task sleep.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum delay between consecutive permitted requests
///
/// The last-request timestamp lives behind an async mutex, and the wait for
/// the delay happens while the lock is held. Exactly one caller proceeds per
/// elapsed interval; the rest queue on the lock.
#[derive(Debug)]
pub struct RateLimiter {
    min_delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter with the given minimum inter-request delay
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_request: Mutex::new(None),
        }
    }

    /// Waits until at least the minimum delay has elapsed since the last
    /// permitted request, then records the new request time
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_delay {
                tokio::time::sleep(self.min_delay - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// The configured minimum inter-request delay
    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }
}
