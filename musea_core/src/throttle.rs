//! Per-upstream request pacing.
//!
//! Some collection APIs ask clients to keep a small gap between requests
//! (the Rijksmuseum in particular). The gate is the only state shared
//! across concurrent requests to one upstream: it is created once with the
//! adapter and never reset.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Minimum-inter-request-interval gate.
///
/// `wait` suspends until at least the configured interval has passed since
/// the previous caller was released. An interval of zero disables the gate.
pub struct RequestGate {
    min_interval: Duration,
    last_release: Mutex<Option<Instant>>,
}

impl RequestGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_release: Mutex::new(None),
        }
    }

    /// Gate built from a millisecond setting; 0 disables pacing.
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub async fn wait(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        // Hold the lock across the sleep so concurrent callers queue up and
        // each gets its own full interval.
        let mut last = self.last_release.lock().await;
        if let Some(prev) = *last {
            let next_allowed = prev + self.min_interval;
            let now = Instant::now();
            if next_allowed > now {
                tokio::time::sleep(next_allowed - now).await;
            }
        }
        *last = Some(Instant::now());
    }
}
