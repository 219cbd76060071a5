use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Enforces a minimum spacing between outbound provider calls.
///
/// The last-call timestamp sits behind an async mutex, so one limiter can be
/// shared by concurrent callers and still space them out.
#[derive(Debug)]
pub struct RateLimiter {
    min_delay: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_call: Mutex::new(None),
        }
    }

    /// A limiter that never waits.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Wait until the next call is allowed, then claim the slot.
    pub async fn throttle(&self) {
        if self.min_delay.is_zero() {
            return;
        }

        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let since = previous.elapsed();
            if since < self.min_delay {
                sleep(self.min_delay - since).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}
