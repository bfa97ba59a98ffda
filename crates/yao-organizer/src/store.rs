//! Snapshot file storage.
//!
//! Snapshots are stored as pretty-printed JSON. Both synchronous and
//! asynchronous I/O methods are provided:
//! - `save()`, `load()` - Synchronous methods using `std::fs`
//! - `save_async()`, `load_async()` - Asynchronous methods using `tokio::fs`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::snapshot::Snapshot;

/// Errors that can occur during snapshot storage operations.
#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    /// I/O error during file read.
    #[error("failed to read snapshot file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write snapshot file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create snapshot directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for snapshot store operations.
pub type Result<T> = std::result::Result<T, SnapshotStoreError>;

/// Reads and writes a snapshot file.
///
/// Saves are atomic: the snapshot is written to a sibling `.tmp` file and
/// renamed over the original.
///
/// # Example
///
/// ```no_run
/// use yao_organizer_rs::SnapshotStore;
///
/// let store = SnapshotStore::new("inventory.json");
/// let snapshot = store.load()?;
/// store.save(&snapshot)?;
/// # Ok::<(), yao_organizer_rs::SnapshotStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the snapshot file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn read_error(&self, source: io::Error) -> SnapshotStoreError {
        SnapshotStoreError::ReadError {
            path: self.path.clone(),
            source,
        }
    }

    /// Loads the snapshot from disk.
    ///
    /// # Errors
    ///
    /// - Returns `SnapshotStoreError::ReadError` if the file cannot be read.
    /// - Returns `SnapshotStoreError::Json` if the file contains invalid JSON.
    pub fn load(&self) -> Result<Snapshot> {
        let contents = fs::read_to_string(&self.path).map_err(|e| self.read_error(e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Saves the snapshot to disk atomically.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `SnapshotStoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `SnapshotStoreError::WriteError` if the file cannot be written.
    /// - Returns `SnapshotStoreError::Json` if serialization fails.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SnapshotStoreError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, &json).map_err(|e| SnapshotStoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| SnapshotStoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Async I/O Methods
    // =========================================================================

    /// Loads the snapshot from disk asynchronously.
    ///
    /// This is the async equivalent of [`load()`](Self::load).
    pub async fn load_async(&self) -> Result<Snapshot> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.read_error(e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Saves the snapshot to disk asynchronously using atomic write.
    ///
    /// This is the async equivalent of [`save()`](Self::save).
    pub async fn save_async(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SnapshotStoreError::CreateDirError {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, &json)
            .await
            .map_err(|e| SnapshotStoreError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| SnapshotStoreError::WriteError {
                path: self.path.clone(),
                source: e,
            })?;

        Ok(())
    }
}
