//! Local blob storage for the pomo timer.
//!
//! Small, independent JSON blobs live under `~/.pomo`, one file per storage
//! key. Exactly two keys exist: the sound preference flag and the task
//! checklist. Timer durations are deliberately not persisted; the daemon
//! boots with defaults.
//!
//! Storage failures never break timer operation: callers fall back to
//! defaults on load errors and log save errors as warnings.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Storage key for the sound preference flag.
pub const SOUND_KEY: &str = "sound";

/// Storage key for the task checklist.
pub const TASKS_KEY: &str = "tasks";

/// Name of the data directory under the home directory.
pub const APP_DIR_NAME: &str = ".pomo";

// ============================================================================
// StorageError
// ============================================================================

/// Errors that can occur while loading or saving blobs.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The home directory could not be determined
    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// An underlying filesystem operation failed
    #[error("Failed to access {path}: {source}")]
    Io {
        /// The path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A stored blob could not be parsed as JSON
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// The path of the unparsable blob
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

// ============================================================================
// Storage
// ============================================================================

/// A key-to-blob store backed by one JSON file per key.
#[derive(Debug, Clone)]
pub struct Storage {
    /// Directory holding the blob files
    dir: PathBuf,
}

impl Storage {
    /// Opens the default store under `~/.pomo`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// data directory cannot be created.
    pub fn open_default() -> Result<Self, StorageError> {
        let home = dirs::home_dir().ok_or(StorageError::HomeDirectoryNotFound)?;
        Self::open(home.join(APP_DIR_NAME))
    }

    /// Opens a store rooted at the given directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Returns the directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Loads the raw blob stored under the key, if present.
    pub fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.key_path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    /// Saves the raw blob under the key, replacing any previous value.
    pub fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.key_path(key);
        fs::write(&path, bytes).map_err(|source| StorageError::Io { path, source })
    }

    /// Loads and deserializes the JSON blob stored under the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob exists but cannot be read or parsed.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.load(key)? {
            Some(bytes) => {
                let value =
                    serde_json::from_slice(&bytes).map_err(|source| StorageError::Parse {
                        path: self.key_path(key),
                        source,
                    })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Serializes a value and saves it as the JSON blob under the key.
    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Parse {
            path: self.key_path(key),
            source,
        })?;
        self.save(key, &bytes)
    }

    /// Returns the persisted sound preference.
    ///
    /// Sound defaults to enabled when the blob is missing or unreadable.
    pub fn load_sound_enabled(&self) -> bool {
        match self.load_json::<bool>(SOUND_KEY) {
            Ok(Some(enabled)) => enabled,
            Ok(None) => true,
            Err(e) => {
                tracing::warn!("Failed to load sound preference: {}", e);
                true
            }
        }
    }

    /// Persists the sound preference flag.
    pub fn save_sound_enabled(&self, enabled: bool) -> Result<(), StorageError> {
        self.save_json(SOUND_KEY, &enabled)
    }
}

// ============================================================================
// Tests
// ============================================================================
