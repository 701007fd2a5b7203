//! One-shot reveal-on-visible tracking.
//!
//! The host registers element handles with a callback; the first time a
//! visibility notification for a handle qualifies (intersecting the
//! margin-adjusted viewport at or above the configured area ratio) the
//! callback fires and the handle is untracked. Qualifying again later does
//! nothing - reveal animations and lazy image loads are strictly one-way.
//!
//! Two delivery paths share the same qualification and one-shot semantics:
//!
//! - [`notify`](RevealObserver::notify) consumes batched entries from a
//!   push-based visibility source the host already has;
//! - [`sweep`](RevealObserver::sweep) is the polling fallback: the host
//!   passes current bounding boxes (typically from a throttled scroll/resize
//!   handler) and the observer computes the overlap ratios itself.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::hash::FixedSeedBuilder;

/// Margin applied to the viewport before intersection is evaluated, in px.
///
/// Positive values grow the viewport on that edge, negative values shrink
/// it. Shrinking the bottom edge makes elements reveal slightly *after*
/// they scroll into view, which reads better for fade-in animations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RootMargin {
    /// Offset of the top edge.
    pub top: i32,
    /// Offset of the right edge.
    pub right: i32,
    /// Offset of the bottom edge.
    pub bottom: i32,
    /// Offset of the left edge.
    pub left: i32,
}

impl RootMargin {
    /// No adjustment on any edge.
    pub const ZERO: Self = Self {
        top: 0,
        right: 0,
        bottom: 0,
        left: 0,
    };
}

/// Configuration fixed at construction of a [`RevealObserver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    /// Fraction of the element's area that must be visible, in `[0, 1]`.
    ///
    /// `0.0` fires as soon as any part of the element overlaps the
    /// margin-adjusted viewport; `1.0` requires the element to be fully
    /// inside it.
    pub threshold: f64,
    /// Viewport adjustment applied before intersection is evaluated.
    pub root_margin: RootMargin,
}

impl Default for RevealConfig {
    /// Reveal at 10% visibility with the bottom edge pulled up 50px.
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: RootMargin {
                top: 0,
                right: 0,
                bottom: -50,
                left: 0,
            },
        }
    }
}

/// One batched visibility change for a tracked handle.
///
/// Mirrors what push-based visibility sources deliver: the handle, how much
/// of the element's area currently overlaps the (margin-adjusted) viewport,
/// and whether it overlaps at all.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityEntry<K> {
    /// The tracked handle this entry refers to.
    pub key: K,
    /// Visible fraction of the element's area, in `[0, 1]`.
    pub intersection_ratio: f64,
    /// Whether the element overlaps the viewport at all.
    pub is_intersecting: bool,
}

/// An axis-aligned box in page coordinates, used by the polling fallback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Rect {
    /// Build a rect from an origin and a size.
    pub fn from_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    /// Area of this rect. Degenerate rects have zero area.
    pub fn area(&self) -> f64 {
        (self.right - self.left).max(0.0) * (self.bottom - self.top).max(0.0)
    }

    /// The overlapping region of two rects, if it has positive area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let clipped = Rect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        };
        (clipped.right > clipped.left && clipped.bottom > clipped.top).then_some(clipped)
    }

    fn adjusted_by(&self, margin: RootMargin) -> Rect {
        Rect {
            left: self.left - f64::from(margin.left),
            top: self.top - f64::from(margin.top),
            right: self.right + f64::from(margin.right),
            bottom: self.bottom + f64::from(margin.bottom),
        }
    }
}

/// Tracks element handles and fires each one's callback exactly once, the
/// first time it becomes sufficiently visible.
///
/// `K` is whatever the host uses to identify elements - an id string, a
/// numeric handle, anything hashable. The observer holds no reference to
/// page structure; it only maps handles to not-yet-fired callbacks.
pub struct RevealObserver<K> {
    threshold: f64,
    root_margin: RootMargin,
    tracked: IndexMap<K, Box<dyn FnOnce()>, FixedSeedBuilder>,
}

impl<K: Eq + Hash> RevealObserver<K> {
    /// Create an observer, validating the configuration.
    ///
    /// Fails fast on a threshold outside `[0, 1]` (including NaN); there is
    /// no sensible recovery from a config typo at runtime.
    pub fn new(config: RevealConfig) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&config.threshold) {
            return Err(ConfigError::ThresholdOutOfRange(config.threshold));
        }
        Ok(Self {
            threshold: config.threshold,
            root_margin: config.root_margin,
            tracked: IndexMap::with_hasher(FixedSeedBuilder),
        })
    }

    /// Register `key` for one-shot tracking.
    ///
    /// Re-observing a key that is still tracked replaces its callback; the
    /// at-most-once guarantee is per registration lifetime, and the old
    /// callback can no longer fire.
    pub fn observe(&mut self, key: K, on_reveal: impl FnOnce() + 'static) {
        self.tracked.insert(key, Box::new(on_reveal));
    }

    /// Stop tracking `key` without firing its callback.
    ///
    /// Unobserving a key that is absent (never observed, already fired, or
    /// already unobserved) is a no-op, not an error.
    pub fn unobserve(&mut self, key: &K) -> bool {
        // Tracked order carries no meaning, so the cheaper removal is fine.
        if self.tracked.swap_remove(key).is_none() {
            cov_mark::hit!(unobserve_untracked_noop);
            return false;
        }
        true
    }

    /// Whether `key` is currently tracked (observed and not yet fired).
    pub fn is_tracked(&self, key: &K) -> bool {
        self.tracked.contains_key(key)
    }

    /// Number of handles still awaiting their first qualifying visibility.
    pub fn tracked_len(&self) -> usize {
        self.tracked.len()
    }

    /// Deliver a batch of visibility changes from a push-based source.
    ///
    /// For every entry whose key is tracked and which qualifies, the
    /// callback runs synchronously and the key is untracked first - so even
    /// a panicking callback cannot fire twice. Entries for untracked keys
    /// are ignored. Entries are processed in delivery order; the relative
    /// order of distinct keys qualifying in one batch carries no guarantee.
    pub fn notify(&mut self, entries: impl IntoIterator<Item = VisibilityEntry<K>>) {
        for entry in entries {
            if !(entry.is_intersecting && entry.intersection_ratio >= self.threshold) {
                continue;
            }
            let Some(on_reveal) = self.tracked.swap_remove(&entry.key) else {
                cov_mark::hit!(reveal_entry_for_untracked_key);
                continue;
            };
            log::trace!("reveal fired, {} still tracked", self.tracked.len());
            on_reveal();
        }
    }

    /// Polling fallback: evaluate current bounding boxes against `viewport`.
    ///
    /// Call this from a (throttled) scroll/resize handler when no push-based
    /// visibility source exists. `rects` supplies the current page-coordinate
    /// bounding box per tracked key; keys not in `rects` simply stay tracked.
    /// The same margin, threshold, and one-shot semantics apply as in
    /// [`notify`](Self::notify).
    pub fn sweep(&mut self, rects: impl IntoIterator<Item = (K, Rect)>, viewport: Rect) {
        let root = viewport.adjusted_by(self.root_margin);
        let entries: Vec<_> = rects
            .into_iter()
            .map(|(key, rect)| {
                let clipped = rect.intersection(&root);
                // A zero-area element inside the root counts as fully
                // visible; there is nothing of it left to show.
                let intersection_ratio = match (&clipped, rect.area()) {
                    (Some(clip), area) if area > 0.0 => clip.area() / area,
                    (Some(_), _) => 1.0,
                    (None, _) => 0.0,
                };
                VisibilityEntry {
                    key,
                    intersection_ratio,
                    is_intersecting: clipped.is_some(),
                }
            })
            .collect();
        self.notify(entries);
    }
}

impl<K: Eq + Hash> std::fmt::Debug for RevealObserver<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealObserver")
            .field("threshold", &self.threshold)
            .field("root_margin", &self.root_margin)
            .field("tracked", &self.tracked.len())
            .finish()
    }
}
