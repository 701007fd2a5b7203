//! Cooldown-window rate limiting.
//!
//! A [`Throttle`] wraps an action with leading-edge gating: the first
//! [`call`](Throttle::call) of a window runs the action immediately and
//! starts a cooldown; calls during the cooldown are dropped outright - not
//! queued, not replayed when the window ends. This matches what a scroll
//! handler wants: react promptly, skip the flood, and accept that the very
//! last scroll position may go unprocessed (the next event will correct it).

use std::marker::PhantomData;
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};

/// Throttled wrapper around an action.
///
/// Unlike [`Debounce`](crate::Debounce) there is nothing to poll and no
/// deferred work: the only state is the instant the current cooldown ends.
pub struct Throttle<T, F, C = SystemClock> {
    action: F,
    limit: Duration,
    clock: C,
    cooldown_until: Option<Instant>,
    _args: PhantomData<fn(T)>,
}

impl<T, F: FnMut(T)> Throttle<T, F> {
    /// Wrap `action` so it runs at most once per `limit`.
    pub fn new(limit: Duration, action: F) -> Self {
        Self::with_clock(limit, action, SystemClock)
    }
}

impl<T, F: FnMut(T), C: Clock> Throttle<T, F, C> {
    /// Wrap `action` using an explicit time source.
    pub fn with_clock(limit: Duration, action: F, clock: C) -> Self {
        Self {
            action,
            limit,
            clock,
            cooldown_until: None,
            _args: PhantomData,
        }
    }

    /// Run the action now unless a cooldown is active.
    ///
    /// Returns whether the action ran; `false` means the call was dropped.
    /// The cooldown is committed *before* the action runs, so a panicking
    /// action propagates to this caller, consumes its window like any other
    /// leading-edge invocation, and leaves the limiter consistent.
    pub fn call(&mut self, args: T) -> bool {
        let now = self.clock.now();
        if let Some(until) = self.cooldown_until {
            if now < until {
                cov_mark::hit!(throttle_call_dropped);
                log::trace!("throttled call dropped, {:?} of cooldown left", until - now);
                return false;
            }
        }
        self.cooldown_until = Some(now + self.limit);
        (self.action)(args);
        true
    }

    /// Whether calls are currently being dropped.
    pub fn in_cooldown(&self) -> bool {
        match self.cooldown_until {
            Some(until) => self.clock.now() < until,
            None => false,
        }
    }

    /// Time left until the next call can run, if a cooldown is active.
    pub fn cooldown_remaining(&self) -> Option<Duration> {
        let until = self.cooldown_until?;
        let now = self.clock.now();
        (now < until).then(|| until - now)
    }
}
