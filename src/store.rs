//! Small persistent key-value store
//!
//! Values are serialized to JSON, one file per key, in the platform data
//! directory (`~/.local/share/shoresquad/` on Linux).

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Prefix applied to every key on disk
const KEY_PREFIX: &str = "shoresquad_";

/// Errors that can occur when writing to the store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Directory creation, write or delete failed
    #[error("Store I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Value could not be serialized
    #[error("Failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// JSON-file backed store for small values such as the last location
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Creates a store in the platform data directory
    ///
    /// Returns `None` if no home directory can be determined.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "shoresquad")?;
        Some(Self::with_dir(project_dirs.data_dir().to_path_buf()))
    }

    /// Creates a store rooted at `dir`
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}.json", KEY_PREFIX, key))
    }

    /// Reads the value stored under `key`
    ///
    /// Missing keys and unreadable or unparsable files yield `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let content = fs::read_to_string(self.path(key)).ok()?;
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(key, %error, "ignoring unparsable stored value");
                None
            }
        }
    }

    /// Stores `value` under `key`, creating the directory if needed
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.path(key), json)?;
        Ok(())
    }

    /// Deletes `key`; `Ok(false)` if nothing was stored
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(error) => Err(error.into()),
        }
    }
}
