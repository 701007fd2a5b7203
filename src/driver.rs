//! Background thread driving a debounced action.
//!
//! [`Debounce`](crate::Debounce) is poll-driven and assumes the host has an
//! event loop. Hosts that don't (CLI tools, observers hanging off a file
//! watcher) can spawn a [`DebounceLoop`] instead: a dedicated thread receives
//! call notifications over a channel and applies a resetting debounce with
//! `recv_timeout` - each arriving call replaces the held arguments and
//! restarts the quiet timer. An optional maximum wait caps how long a
//! constant stream of calls can defer the action.
//!
//! When no calls are pending the thread blocks on the channel and consumes
//! no CPU. Closing the handle flushes a trailing pending call before the
//! thread exits, so the last call's arguments are never silently lost.
//!
//! ## Usage
//!
//! ```ignore
//! let handle = DebounceLoop::new(Duration::from_millis(100))
//!     .max_wait(Duration::from_millis(400))
//!     .spawn(|size: (u32, u32)| relayout(size));
//!
//! handle.call((800, 600));
//! handle.call((812, 600));   // replaces the previous args, resets the timer
//! // relayout runs once, 100ms after the calls stop
//! ```

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Builder for a background debounce thread.
#[allow(clippy::type_complexity)]
pub struct DebounceLoop {
    wait: Duration,
    max_wait: Option<Duration>,
    spawn_fn: Option<Box<dyn FnOnce(Box<dyn FnOnce() + Send>) -> JoinHandle<()> + Send>>,
}

impl DebounceLoop {
    /// Start configuring a loop with the given quiet period.
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            max_wait: None,
            spawn_fn: None,
        }
    }

    /// Cap the total deferral: even under a constant stream of calls, the
    /// action runs at least once per `max_wait`.
    ///
    /// Without a cap, a pathological caller that never goes quiet defers
    /// the action indefinitely.
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    /// Use a custom thread spawner, e.g. to set a thread name or stack size.
    ///
    /// ```ignore
    /// DebounceLoop::new(wait)
    ///     .spawn_fn(|f| {
    ///         std::thread::Builder::new()
    ///             .name("resize-debounce".into())
    ///             .spawn(f)
    ///             .unwrap()
    ///     })
    ///     .spawn(action);
    /// ```
    pub fn spawn_fn<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Box<dyn FnOnce() + Send>) -> JoinHandle<()> + Send + 'static,
    {
        self.spawn_fn = Some(Box::new(f));
        self
    }

    /// Spawn the thread; the returned handle feeds it calls.
    pub fn spawn<T, F>(self, action: F) -> DebounceHandle<T>
    where
        T: Send + 'static,
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<T>();
        let wait = self.wait;
        let max_wait = self.max_wait;

        let loop_fn: Box<dyn FnOnce() + Send> = Box::new(move || {
            debounce_loop(rx, wait, max_wait, action);
        });

        let thread = match self.spawn_fn {
            Some(spawn_fn) => spawn_fn(loop_fn),
            None => thread::spawn(loop_fn),
        };

        DebounceHandle {
            tx: Some(tx),
            thread: Some(thread),
        }
    }
}

/// The debounce thread body.
fn debounce_loop<T, F: FnMut(T)>(
    rx: Receiver<T>,
    wait: Duration,
    max_wait: Option<Duration>,
    mut action: F,
) {
    loop {
        // Block until the first call of a burst (zero CPU while idle).
        let Ok(mut latest) = rx.recv() else {
            return;
        };

        // Resetting debounce: each new call replaces the held args and
        // restarts the quiet timer, up to the optional max wait.
        let burst_start = Instant::now();
        let disconnected = loop {
            let timeout = match max_wait {
                Some(max) => {
                    let elapsed = burst_start.elapsed();
                    if elapsed >= max {
                        break false;
                    }
                    wait.min(max - elapsed)
                }
                None => wait,
            };
            match rx.recv_timeout(timeout) {
                Ok(args) => latest = args,
                Err(RecvTimeoutError::Timeout) => break false,
                Err(RecvTimeoutError::Disconnected) => break true,
            }
        };

        action(latest);

        if disconnected {
            // Trailing flush done; nothing more can arrive.
            return;
        }
    }
}

/// Handle to a running [`DebounceLoop`] thread.
///
/// Dropping the handle closes the channel; the thread flushes any pending
/// call and exits on its own. Use [`close`](Self::close) to wait for that
/// deterministically.
pub struct DebounceHandle<T> {
    tx: Option<Sender<T>>,
    thread: Option<JoinHandle<()>>,
}

impl<T> DebounceHandle<T> {
    /// Feed a call to the loop. Returns `false` if the thread has stopped.
    pub fn call(&self, args: T) -> bool {
        match &self.tx {
            Some(tx) => tx.send(args).is_ok(),
            None => false,
        }
    }

    /// Close the channel and wait for the thread to flush and exit.
    pub fn close(mut self) {
        self.tx = None;
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::warn!("debounce loop thread panicked in wrapped action");
            }
        }
    }
}
