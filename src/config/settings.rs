//! Settings store
//!
//! Sitemap settings are administrator-authored key-value data. The store is
//! injected into every render; nothing in the crate keeps a global copy.
//!
//! Reads never fail: a missing or corrupted settings document reads as empty,
//! so the public-facing render falls back to defaults. Writes report errors.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

/// Errors from settings persistence
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {reason}")]
    Read { path: PathBuf, reason: String },
    #[error("failed to write settings to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to lock settings file {path:?}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key-value settings storage
pub trait SettingsStore {
    /// Read a value, `None` when unset or unreadable
    fn get(&self, key: &str) -> Option<Value>;

    /// Replace the value of a key
    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError>;

    /// Read a value, falling back to `default`
    fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// Read several keys from one snapshot of the store
    fn get_many(&self, keys: &[&str]) -> Vec<Option<Value>> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    /// Replace several keys in a single write
    fn set_many(&self, entries: Vec<(&str, Value)>) -> Result<(), SettingsError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Settings kept in memory
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<IndexMap<String, Value>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with values
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: Mutex::new(values.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.set_many(vec![(key, value)])
    }

    fn get_many(&self, keys: &[&str]) -> Vec<Option<Value>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        keys.iter().map(|key| values.get(*key).cloned()).collect()
    }

    fn set_many(&self, entries: Vec<(&str, Value)>) -> Result<(), SettingsError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        for (key, value) in entries {
            values.insert(key.to_string(), value);
        }
        Ok(())
    }
}

/// Settings persisted as a pretty-printed JSON object on disk
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole settings document
    fn read_document(&self) -> Result<IndexMap<String, Value>, SettingsError> {
        if !self.path.exists() {
            return Ok(IndexMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| SettingsError::Read {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        if content.trim().is_empty() {
            return Ok(IndexMap::new());
        }

        serde_json::from_str(&content).map_err(|e| SettingsError::Read {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Hold an exclusive lock on `<settings>.lock` until the file is dropped
    fn lock(&self) -> Result<File, SettingsError> {
        let lock_path = self.path.with_extension("lock");
        let lock_err = |source| SettingsError::Lock {
            path: lock_path.clone(),
            source,
        };

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(lock_err)?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(lock_err)?;
        file.lock_exclusive().map_err(lock_err)?;
        Ok(file)
    }

    /// Write the document through a temp file and rename it into place
    fn write_document(&self, document: &IndexMap<String, Value>) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = serde_json::to_string_pretty(document)?;
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(write_err)?;
            file.write_all(content.as_bytes()).map_err(write_err)?;
            file.sync_all().map_err(write_err)?;
        }

        fs::rename(&temp_path, &self.path).map_err(write_err)?;
        tracing::debug!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.get_many(&[key]).pop().flatten()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.set_many(vec![(key, value)])
    }

    fn get_many(&self, keys: &[&str]) -> Vec<Option<Value>> {
        match self.read_document() {
            Ok(mut document) => keys.iter().map(|key| document.shift_remove(*key)).collect(),
            Err(e) => {
                tracing::warn!("Using defaults for {}: {}", keys.join(", "), e);
                vec![None; keys.len()]
            }
        }
    }

    fn set_many(&self, entries: Vec<(&str, Value)>) -> Result<(), SettingsError> {
        let _lock = self.lock()?;
        // Refuse to overwrite a document we cannot parse
        let mut document = self.read_document()?;
        for (key, value) in entries {
            document.insert(key.to_string(), value);
        }
        self.write_document(&document)
    }
}
