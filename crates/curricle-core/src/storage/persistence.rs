//! Durable key/value persistence
//!
//! The document persists as two string-keyed entries, one per
//! collection, stored as JSON files under the data directory
//! (`<data_dir>/<key>.json`). Writes are atomic (write to a temp file,
//! then rename) so an interrupted write never leaves a half-written
//! entry behind.
//!
//! Storage location: `~/.local/share/curricle/` (configurable via
//! `Config`).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::storage::error::{StorageError, StorageResult};

/// Entry key for the module sequence
pub const MODULES_KEY: &str = "modules";
/// Entry key for the item sequence
pub const ITEMS_KEY: &str = "items";

/// String-keyed durable entry store backed by the filesystem
pub struct EntryStore {
    config: Config,
}

impl EntryStore {
    /// Create an entry store over the configured data directory
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path backing an entry key
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.config.data_dir.join(format!("{}.json", key))
    }

    /// Check whether an entry has ever been written
    pub fn exists(&self, key: &str) -> bool {
        self.entry_path(key).exists()
    }

    /// Read an entry's value
    ///
    /// Returns `None` when the entry has never been written.
    pub fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StorageError::Read { path, source })
    }

    /// Write an entry's value atomically
    pub fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        atomic_write(&self.entry_path(key), value.as_bytes())
    }

    /// Delete every entry and the cached files directory
    ///
    /// Used by tests and by nothing on the normal clear path: clearing
    /// the document rewrites both entries as empty sequences instead.
    pub fn delete_all(&self) -> StorageResult<()> {
        for key in [MODULES_KEY, ITEMS_KEY] {
            let path = self.entry_path(key);
            if path.exists() {
                fs::remove_file(&path)
                    .map_err(|source| StorageError::Write { path, source })?;
            }
        }
        let files = self.config.files_dir();
        if files.exists() {
            fs::remove_dir_all(&files)
                .map_err(|source| StorageError::Write { path: files, source })?;
        }
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::Rename {
        from: temp_path,
        to: path.to_path_buf(),
        source,
    })
}
