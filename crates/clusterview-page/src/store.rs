//! Key-value storage for page preferences.
//!
//! Column choices outlive a session. The [`PreferenceStore`] trait abstracts
//! over where they go, so tests can use [`MemoryStore`] and a host can use
//! [`JsonFileStore`] or its own backend.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::error::{PageError, Result};

/// A string-keyed store of JSON documents.
pub trait PreferenceStore: Send + Sync {
    /// Reads the document stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `json` under `key`, replacing any previous value.
    fn set(&self, key: &str, json: &str) -> Result<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, json: &str) -> Result<()> {
        (**self).set(key, json)
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, json: &str) -> Result<()> {
        (**self).set(key, json)
    }
}

// === In-memory implementation ===

/// Volatile store, for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store with an entry.
    pub fn with_entry(self, key: impl Into<String>, json: impl Into<String>) -> Self {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), json.into());
        }
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| PageError::StorePoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, json: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| PageError::StorePoisoned)?;
        entries.insert(key.to_string(), json.to_string());
        Ok(())
    }
}

// === File-backed implementation ===

/// Durable store keeping every entry in one JSON object on disk.
///
/// The file is read on each access and rewritten on each `set`. A missing
/// file reads as empty. Writes go to a sibling `.tmp` file that is then
/// renamed over the original, and a file that no longer parses is replaced
/// on the next `set` rather than blocking it.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileStore {
    /// Uses the file at `path`; parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// Uses `preferences.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_all(&self) -> Result<BTreeMap<String, serde_json::Value>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.read().map_err(|_| PageError::StorePoisoned)?;
        let entries = self.read_all()?;
        entries
            .get(key)
            .map(serde_json::to_string)
            .transpose()
            .map_err(PageError::from)
    }

    fn set(&self, key: &str, json: &str) -> Result<()> {
        let _guard = self.lock.write().map_err(|_| PageError::StorePoisoned)?;
        let value: serde_json::Value = serde_json::from_str(json)?;
        let mut entries = match self.read_all() {
            Err(PageError::Json(err)) => {
                warn!(path = %self.path.display(), error = %err, "discarding unreadable preferences");
                BTreeMap::new()
            }
            other => other?,
        };
        entries.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let staging = self.staging_path();
        fs::write(&staging, serde_json::to_string_pretty(&entries)?)?;
        fs::rename(&staging, &self.path)?;
        debug!(key, path = %self.path.display(), "preference written");
        Ok(())
    }
}
