//! Preference persistence.
//!
//! A page keeps exactly two user preferences across sessions: the dark-mode
//! flag and the display language. Both are tiny enumerated strings, so the
//! storage contract is deliberately minimal: a synchronous string key-value
//! backend that survives restarts. [`PreferenceStore`] wraps a backend with
//! the reliability policy the UI needs - reads and writes never fail from the
//! caller's point of view, a broken backend just means "use the default".
//!
//! Stored representation (fixed, shared with prior deployments):
//! - `"darkMode"` holds `"true"` or `"false"`, absent means light mode;
//! - `"language"` holds `"es"` or `"en"`, absent means Spanish.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::StorageError;
use crate::hash::FixedSeedBuilder;

/// Storage key for the dark-mode flag.
pub const KEY_DARK_MODE: &str = "darkMode";

/// Storage key for the display language.
pub const KEY_LANGUAGE: &str = "language";

/// Display language preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Language {
    /// Spanish (the default when nothing is stored).
    #[default]
    Es,
    /// English.
    En,
}

impl Language {
    /// The stored string form of this language.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    /// The other language. Backs the toggle button.
    pub fn toggled(self) -> Self {
        match self {
            Language::Es => Language::En,
            Language::En => Language::Es,
        }
    }

    fn from_stored(value: &str) -> Option<Self> {
        match value {
            "es" => Some(Language::Es),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}

/// A synchronous string key-value store scoped to one installation.
///
/// Implementations report failures precisely via [`StorageError`];
/// [`PreferenceStore`] decides what to do about them (swallow and default).
pub trait StorageBackend {
    /// Read the value stored under `key`, or `None` if never written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Durably store `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile in-memory backend for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    map: HashMap<String, String, FixedSeedBuilder>,
}

impl MemoryStorage {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Durable backend persisting the whole map as one JSON file.
///
/// The map is loaded once at open and written through on every change.
/// With two keys and values a handful of bytes long, rewriting the file is
/// cheaper than any incremental scheme would be to maintain.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    map: HashMap<String, String, FixedSeedBuilder>,
}

impl FileStorage {
    /// Open (or create) the store backed by the file at `path`.
    ///
    /// A missing file is an empty store; a missing parent directory is
    /// created. A present-but-unparsable file is an error - silently
    /// discarding someone's preferences is worse than failing open.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let map = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, map })
    }

    fn persist(&self) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(&self.map)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.insert(key.to_owned(), value.to_owned());
        self.persist()
    }
}

/// Typed preference access with a never-fails contract.
///
/// `get` returns the caller's default whenever the backend has no value OR
/// the backend fails; `set` is best-effort. Failures are logged and counted,
/// never surfaced - a portfolio page that can't persist dark mode should
/// still render in dark mode for the rest of the session.
#[derive(Debug)]
pub struct PreferenceStore<S: StorageBackend> {
    backend: S,
}

impl<S: StorageBackend> PreferenceStore<S> {
    /// Wrap a storage backend.
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// The stored value for `key`, or `default` if absent or unreadable.
    pub fn get(&self, key: &str, default: &str) -> String {
        match self.backend.read(key) {
            Ok(Some(value)) => value,
            Ok(None) => default.to_owned(),
            Err(err) => {
                cov_mark::hit!(storage_read_swallowed);
                log::warn!("preference read for {key:?} failed, using default: {err}");
                default.to_owned()
            }
        }
    }

    /// Best-effort durable write of `value` under `key`.
    pub fn set(&mut self, key: &str, value: &str) {
        if let Err(err) = self.backend.write(key, value) {
            cov_mark::hit!(storage_write_swallowed);
            log::warn!("preference write for {key:?} failed, value not persisted: {err}");
        }
    }

    /// Whether dark mode is enabled. Absent or unreadable means light mode.
    pub fn dark_mode(&self) -> bool {
        self.get(KEY_DARK_MODE, "false") == "true"
    }

    /// Persist the dark-mode flag.
    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.set(KEY_DARK_MODE, if enabled { "true" } else { "false" });
    }

    /// The stored display language.
    ///
    /// An unrecognized stored value is treated the same as an absent one;
    /// the value set only ever grows, so an old binary reading a newer
    /// store must not crash.
    pub fn language(&self) -> Language {
        let stored = self.get(KEY_LANGUAGE, Language::default().as_str());
        Language::from_stored(&stored).unwrap_or_default()
    }

    /// Persist the display language.
    pub fn set_language(&mut self, language: Language) {
        self.set(KEY_LANGUAGE, language.as_str());
    }
}
