//! Local key/value persistence.
//!
//! Stands in for browser storage: a handful of JSON documents addressed by
//! short keys. [`FileStore`] survives restarts, [`MemoryStore`] lives as long
//! as the process.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Key holding the active [`crate::auth::Session`].
pub const SESSION_KEY: &str = "session";
/// Key holding the most recent [`crate::ProjectRecord`] snapshot.
pub const LAST_PROJECT_KEY: &str = "last_project";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage key '{key}' must be non-empty and use only [a-z0-9_-]")]
    InvalidKey { key: String },

    #[error("storage io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for '{key}' is not valid: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage lock poisoned")]
    Poisoned,
}

pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    fn put(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Returns whether a value was present.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        Self: Sized,
    {
        self.get(key)?
            .map(|value| {
                serde_json::from_value(value).map_err(|source| StorageError::Serialization {
                    key: key.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        Self: Sized,
    {
        let value = serde_json::to_value(value).map_err(|source| StorageError::Serialization {
            key: key.to_owned(),
            source,
        })?;
        self.put(key, value)
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == '-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_owned(),
        })
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StorageError::Serialization {
                key: key.to_owned(),
                source,
            })
    }

    fn put(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StorageError::Io { path, source }
        };

        fs::create_dir_all(&self.root).map_err(io_err(&self.root))?;

        let payload =
            serde_json::to_vec_pretty(&value).map_err(|source| StorageError::Serialization {
                key: key.to_owned(),
                source,
            })?;

        // The staging file is removed on drop unless it was persisted.
        let mut staging = NamedTempFile::new_in(&self.root).map_err(io_err(&self.root))?;
        staging.write_all(&payload).map_err(io_err(staging.path()))?;
        staging
            .as_file()
            .sync_all()
            .map_err(io_err(staging.path()))?;
        staging
            .persist(&path)
            .map_err(|error| io_err(&path)(error.error))?;

        tracing::debug!(key, path = %path.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

/// Process-lifetime store, the equivalent of session storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        validate_key(key)?;
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: Value) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.remove(key).is_some())
    }
}
