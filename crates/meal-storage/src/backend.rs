//! Storage backends
//!
//! A backend is a flat string key/value store, the moral equivalent of browser
//! local storage. It knows nothing about JSON or record paths; decoding and
//! partial access are resolved by [`StateStore`](crate::StateStore).

use crate::error::{StorageError, StorageResult};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Flat key/value persistence port
pub trait StorageBackend: Send + Sync {
    /// Read raw text stored under `key`
    ///
    /// # Errors
    /// Returns error if the backend itself fails; an absent key is `Ok(None)`.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store raw text under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns error if the value could not be persisted.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; removing an absent key is not an error
    ///
    /// # Errors
    /// Returns error if the backend itself fails.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// All keys currently stored
    ///
    /// # Errors
    /// Returns error if the backend cannot be enumerated.
    fn keys(&self) -> StorageResult<Vec<String>>;
}

/// In-memory backend
///
/// Keys are kept ordered, so enumeration is deterministic.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackend {
    /// Create empty backend
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if nothing is stored
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.inner.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.inner.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.inner.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.inner.lock().keys().cloned().collect())
    }
}

/// Directory backend: one `<key>.json` file per key
///
/// Writes go through a temporary file in the same directory and are renamed
/// into place, so a crash never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct DirectoryBackend {
    root: PathBuf,
}

const FILE_EXTENSION: &str = "json";

impl DirectoryBackend {
    /// Create backend rooted at `root`; the directory is created on first write
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the value files
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_for(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::Backend(format!(
                "key '{key}' cannot be used as a file name"
            )));
        }
        Ok(self.root.join(format!("{key}.{FILE_EXTENSION}")))
    }
}

impl StorageBackend for DirectoryBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.file_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io_error(path, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.file_for(key)?;
        std::fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::io_error(&self.root, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)
            .map_err(|e| StorageError::io_error(&self.root, e))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| StorageError::io_error(tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| StorageError::io_error(&path, e.error))?;

        tracing::trace!(key, path = %path.display(), "value written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.file_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io_error(path, e)),
        }
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io_error(&self.root, e)),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io_error(&self.root, e))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}
