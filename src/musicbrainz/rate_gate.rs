//! Minimum-interval gate for outbound MusicBrainz requests.
//!
//! MusicBrainz asks clients to stay at or below one request per second. Every
//! upstream call goes through [`RateGate::wait_turn`], which delays the caller
//! until at least `min_interval` has passed since the previous dispatch.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Time source used by the gate. Swapped out in tests.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Serializes dispatches so that consecutive ones are at least `min_interval` apart.
///
/// The last dispatch time lives behind an async mutex that stays locked while a
/// caller waits, so concurrent callers queue up in lock order instead of all
/// reading the same stale timestamp.
pub struct RateGate {
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
    clock: Arc<dyn Clock>,
}

impl RateGate {
    pub fn new(min_interval: Duration) -> Self {
        Self::with_clock(min_interval, Arc::new(TokioClock))
    }

    pub fn with_clock(min_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            min_interval,
            last_dispatch: Mutex::new(None),
            clock,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the caller is allowed to dispatch, then record the dispatch.
    ///
    /// Returns the instant recorded as the dispatch time.
    pub async fn wait_turn(&self) -> Instant {
        let mut last = self.last_dispatch.lock().await;

        if let Some(previous) = *last {
            let elapsed = self.clock.now().saturating_duration_since(previous);
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!("MusicBrainz rate gate: waiting {:?}", wait);
                self.clock.sleep(wait).await;
            }
        }

        let dispatched_at = self.clock.now();
        *last = Some(dispatched_at);
        dispatched_at
    }
}
