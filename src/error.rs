//! Error taxonomy.
//!
//! Only two things can go wrong that the caller ever sees: a component was
//! constructed with an impossible configuration (fail fast, not recoverable),
//! or a wrapped action panicked during its own invocation (propagates to that
//! caller, limiter state stays consistent). Storage failures are deliberately
//! NOT in this set - [`PreferenceStore`](crate::PreferenceStore) swallows
//! them and falls back to defaults.

use thiserror::Error;

/// A component was constructed with parameters outside its valid range.
///
/// Raised at construction time, never during operation. Note that negative
/// wait/limit durations are unrepresentable: `std::time::Duration` is
/// unsigned, so the limiters need no runtime validation at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Visibility threshold must be a ratio of the element's area.
    #[error("visibility threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),
}

/// A storage backend failed to read or write.
///
/// Callers of [`PreferenceStore`](crate::PreferenceStore) never observe this
/// type; it exists so backends can report failures precisely and the store
/// can log them before treating the value as absent.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying file could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted map could not be parsed or serialized.
    #[error("storage format invalid: {0}")]
    Format(#[from] serde_json::Error),

    /// The backend is (possibly temporarily) unusable, e.g. quota exceeded.
    #[error("storage unavailable")]
    Unavailable,
}
