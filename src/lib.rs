#![deny(missing_docs)]

//! Small, host-agnostic building blocks for interactive pages.
//!
//! This crate extracts the behaviors a presentation layer keeps reinventing —
//! remembering a user's theme and language, fading elements in the first time
//! they scroll into view, and keeping scroll handlers from firing hundreds of
//! times a second — into three independent, individually testable utilities.
//! None of them know anything about a document tree or a display surface: the
//! host owns the elements and feeds trigger events in; the utilities manage
//! only state transitions and timing.
//!
//! # Quick Start
//!
//! ```ignore
//! use vitrine::{Debounce, MemoryStorage, PreferenceStore, RevealConfig, RevealObserver, Throttle};
//!
//! // Preferences survive restarts; storage failures fall back to defaults.
//! let mut prefs = PreferenceStore::new(MemoryStorage::new());
//! prefs.set_dark_mode(true);
//! assert!(prefs.dark_mode());
//!
//! // One-shot reveal: the callback fires on the first qualifying
//! // visibility notification, then the key is untracked.
//! let mut reveals = RevealObserver::new(RevealConfig::default())?;
//! reveals.observe("hero", || fade_in("hero"));
//!
//! // Rate limiting: debounce waits for quiet, throttle gates a window.
//! let mut on_resize = Debounce::new(Duration::from_millis(100), relayout);
//! let mut on_scroll = Throttle::new(Duration::from_millis(100), repaint);
//! ```
//!
//! # Core Types
//!
//! - [`PreferenceStore`] - Typed, failure-swallowing wrapper over a
//!   [`StorageBackend`]. Ships [`MemoryStorage`] and [`FileStorage`].
//! - [`RevealObserver`] - One-shot visibility tracker with a push
//!   ([`notify`](RevealObserver::notify)) and a polling fallback
//!   ([`sweep`](RevealObserver::sweep)) delivery path.
//! - [`Debounce`] / [`Throttle`] - The two rate-limiting policies: run after
//!   a quiet period with the latest arguments, or run leading-edge once per
//!   cooldown window and drop the rest.
//! - [`DebounceLoop`] - Optional background thread that drives a debounced
//!   action for hosts without their own event loop.
//! - [`ScrollSpy`] - Pure scroll-position bookkeeping: active section,
//!   parallax offset, threshold predicates.
//!
//! # Driving the limiters
//!
//! The limiters are clock-injected and poll-driven, so a host event loop (or
//! a test) owns time:
//!
//! ```ignore
//! loop {
//!     handle_events();          // may call on_resize.call(size) many times
//!     on_resize.poll();         // runs relayout once the quiet period passed
//! }
//! ```
//!
//! Hosts without a loop can spawn a [`DebounceLoop`] instead, which owns the
//! action on a background thread and coalesces bursts automatically.

mod clock;
mod debounce;
mod driver;
mod error;
mod hash;
mod reveal;
mod scrollspy;
mod store;
mod throttle;

pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::Debounce;
pub use driver::{DebounceHandle, DebounceLoop};
pub use error::{ConfigError, StorageError};
pub use reveal::{Rect, RevealConfig, RevealObserver, RootMargin, VisibilityEntry};
pub use scrollspy::{parallax_offset, past, ScrollSpy, Section};
pub use store::{
    FileStorage, Language, MemoryStorage, PreferenceStore, StorageBackend, KEY_DARK_MODE,
    KEY_LANGUAGE,
};
pub use throttle::Throttle;

#[cfg(test)]
mod tests;
