//! Politeness delay between listing pages.
//!
//! The crawler pauses after every non-empty page. The pause is a capability
//! handed to the crawler so tests can skip it.

use rand::{Rng, rng};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Default upper bound of the random pause.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(1);

/// Something the crawler awaits between pages.
pub trait Delay {
    async fn pause(&self);
}

/// Sleeps for a duration drawn uniformly from `[0, max)`.
#[derive(Debug, Clone, Copy)]
pub struct RandomDelay {
    max: Duration,
}

impl RandomDelay {
    pub fn new(max: Duration) -> Self {
        Self { max }
    }

    /// Draw the next pause length.
    pub fn next_duration(&self) -> Duration {
        if self.max.is_zero() {
            return Duration::ZERO;
        }
        let secs = rng().random_range(0.0..self.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

impl Default for RandomDelay {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELAY)
    }
}

impl Delay for RandomDelay {
    async fn pause(&self) {
        let duration = self.next_duration();
        debug!(millis = duration.as_millis() as u64, "Politeness delay");
        sleep(duration).await;
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    async fn pause(&self) {}
}
