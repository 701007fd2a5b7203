//! Time source abstraction for the rate limiters.
//!
//! The limiters never sleep; they only compare "now" against a recorded
//! deadline. Injecting the time source keeps every timing property
//! deterministic in tests (advance a [`ManualClock`] instead of sleeping)
//! while production code pays nothing beyond an `Instant::now()` call.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// A monotonic time source.
pub trait Clock {
    /// The current instant. Must be monotonically non-decreasing.
    fn now(&self) -> Instant;
}

/// The real wall clock, via [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A hand-driven clock for deterministic tests and simulations.
///
/// Cloning yields a handle to the same underlying instant, so a test can
/// keep one handle and give another to a limiter:
///
/// ```ignore
/// let clock = ManualClock::new();
/// let mut limiter = Debounce::with_clock(wait, action, clock.clone());
/// clock.advance(Duration::from_millis(100));
/// limiter.poll();
/// ```
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Create a manual clock anchored at the current real instant.
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock();
        *now += delta;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}
