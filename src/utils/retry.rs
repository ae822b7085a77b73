//! Bounded background retry
//!
//! Some host data is not available at the moment its callback fires —
//! a freshly created document gets its final name a moment later, for
//! example. [`RetryRunner`] decouples "event observed" from "event
//! fully resolved": the condition is polled on a background task until
//! it succeeds or a fixed number of attempts is exhausted, and the host
//! thread is never blocked. Giving up is silent; this is a best-effort,
//! eventually-consistent read, not a guaranteed one.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Default number of condition invocations before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Default pause between attempts
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(500);

pub struct RetryRunner {
    max_attempts: usize,
    interval: Duration,
    handle: tokio::runtime::Handle,
}

impl RetryRunner {
    /// Runner with the default ten attempts at 500 ms spacing
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; see
    /// [`RetryRunner::with_handle`].
    pub fn new() -> Self {
        Self::with(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_INTERVAL)
    }

    /// Runner with a custom attempt cap and spacing
    pub fn with(max_attempts: usize, interval: Duration) -> Self {
        Self::with_handle(tokio::runtime::Handle::current(), max_attempts, interval)
    }

    pub fn with_handle(
        handle: tokio::runtime::Handle,
        max_attempts: usize,
        interval: Duration,
    ) -> Self {
        Self {
            max_attempts,
            interval,
            handle,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll `condition` on a background task until it returns `true`,
    /// at most `max_attempts` times with `interval` pauses in between
    ///
    /// The first attempt runs immediately. The returned handle resolves
    /// to whether the condition eventually succeeded; fire-and-forget
    /// callers simply drop it. Each call owns its own attempt counter —
    /// overlapping calls must not share mutable state through their
    /// closures.
    pub fn try_until(&self, mut condition: impl FnMut() -> bool + Send + 'static) -> JoinHandle<bool> {
        let max_attempts = self.max_attempts;
        let interval = self.interval;

        self.handle.spawn(async move {
            for attempt in 1..=max_attempts {
                if condition() {
                    return true;
                }
                if attempt < max_attempts {
                    tokio::time::sleep(interval).await;
                }
            }
            log::debug!("condition not met after {} attempts, giving up", max_attempts);
            false
        })
    }
}

impl Default for RetryRunner {
    fn default() -> Self {
        Self::new()
    }
}
