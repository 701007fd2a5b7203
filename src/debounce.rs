//! Quiet-period rate limiting.
//!
//! A [`Debounce`] wraps an action and delays it until calls stop arriving:
//! every [`call`](Debounce::call) replaces the single pending invocation with
//! the latest arguments and pushes the deadline out by the full wait, so the
//! action runs once per quiet interval, with the arguments of the last call
//! before the quiet began. The classic use is a resize handler that should
//! relayout once the user stops dragging, not on every intermediate size.
//!
//! The limiter never sleeps and owns no thread; the host drives it by
//! calling [`poll`](Debounce::poll) from its event loop (or by advancing a
//! [`ManualClock`](crate::ManualClock) in tests). Hosts without a loop can
//! use [`DebounceLoop`](crate::DebounceLoop) instead.

use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};

/// The single outstanding scheduled invocation.
struct Pending<T> {
    args: T,
    deadline: Instant,
}

/// Debounced wrapper around an action.
///
/// Holds at most one pending invocation at any time. Calls cancel and
/// reschedule; [`poll`](Self::poll) fires the action once the deadline has
/// passed.
pub struct Debounce<T, F, C = SystemClock> {
    action: F,
    wait: Duration,
    clock: C,
    pending: Option<Pending<T>>,
}

impl<T, F: FnMut(T)> Debounce<T, F> {
    /// Wrap `action` so it runs `wait` after the last call.
    pub fn new(wait: Duration, action: F) -> Self {
        Self::with_clock(wait, action, SystemClock)
    }
}

impl<T, F: FnMut(T), C: Clock> Debounce<T, F, C> {
    /// Wrap `action` using an explicit time source.
    pub fn with_clock(wait: Duration, action: F, clock: C) -> Self {
        Self {
            action,
            wait,
            clock,
            pending: None,
        }
    }

    /// Record a call: replace any pending invocation with `args` and reset
    /// the deadline to `now + wait`.
    pub fn call(&mut self, args: T) {
        let deadline = self.clock.now() + self.wait;
        if self.pending.is_some() {
            cov_mark::hit!(debounce_rescheduled);
        }
        self.pending = Some(Pending { args, deadline });
    }

    /// Run the action if a pending invocation's deadline has passed.
    ///
    /// Returns whether the action ran. The pending slot is cleared *before*
    /// the action runs, so a panicking action propagates to this caller but
    /// leaves the limiter idle and fully usable.
    pub fn poll(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) if self.clock.now() >= pending.deadline => {
                log::trace!("debounce fired after quiet period of {:?}", self.wait);
                (self.action)(pending.args);
                true
            }
            Some(pending) => {
                self.pending = Some(pending);
                false
            }
            None => false,
        }
    }

    /// Run a pending invocation immediately, ignoring the remaining wait.
    ///
    /// Returns whether the action ran. Useful on teardown so a trailing
    /// call is not silently lost.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                (self.action)(pending.args);
                true
            }
            None => false,
        }
    }

    /// Drop any pending invocation without running it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Whether an invocation is scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending invocation, if any.
    ///
    /// Lets a host event loop pick its next wakeup instead of polling
    /// blindly.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}
