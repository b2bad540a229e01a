//! Namespaced JSON state store
//!
//! [`StateStore`] layers three things over a flat [`StorageBackend`]:
//! - a key prefix, so every record lives in one namespace
//! - JSON decoding, where unreadable data counts as absent
//! - dotted [`RecordPath`] access to fields nested inside a record

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use crate::path::RecordPath;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Default namespace prefix for planner records
pub const DEFAULT_PREFIX: &str = "mealplanner_";

/// Namespaced, JSON-decoding view over a storage backend
#[derive(Debug)]
pub struct StateStore<B> {
    backend: B,
    prefix: String,
}

impl<B: StorageBackend> StateStore<B> {
    /// Create store over `backend` using `prefix` for every key
    #[inline]
    #[must_use]
    pub fn new(backend: B, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    /// Underlying backend
    #[inline]
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Namespace prefix
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn qualified(&self, record: &str) -> String {
        format!("{}{record}", self.prefix)
    }

    /// Decode a whole record
    ///
    /// Text that is not valid JSON is logged and reported as absent.
    ///
    /// # Errors
    /// Returns error only if the backend read fails.
    pub fn read_record(&self, record: &str) -> StorageResult<Option<Value>> {
        let Some(text) = self.backend.read(&self.qualified(record))? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(record, error = %e, "unreadable record treated as absent");
                Ok(None)
            }
        }
    }

    /// Raw JSON value at `path`
    ///
    /// # Errors
    /// Returns error only if the backend read fails.
    pub fn get_value(&self, path: &RecordPath) -> StorageResult<Option<Value>> {
        let Some(root) = self.read_record(path.record_name())? else {
            return Ok(None);
        };
        Ok(path.resolve(&root).filter(|v| !v.is_null()).cloned())
    }

    /// Typed value at `path`
    ///
    /// A value that does not decode as `T` is logged and reported as absent.
    ///
    /// # Errors
    /// Returns error only if the backend read fails.
    pub fn get<T: DeserializeOwned>(&self, path: &RecordPath) -> StorageResult<Option<T>> {
        let Some(value) = self.get_value(path)? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(e) => {
                tracing::warn!(%path, error = %e, "value has unexpected shape, treated as absent");
                Ok(None)
            }
        }
    }

    /// Typed value at `path`, or `T::default()` when absent
    ///
    /// # Errors
    /// Returns error only if the backend read fails.
    pub fn get_or_default<T: DeserializeOwned + Default>(
        &self,
        path: &RecordPath,
    ) -> StorageResult<T> {
        Ok(self.get(path)?.unwrap_or_default())
    }

    /// Store `value` at `path`
    ///
    /// Nested paths rewrite the enclosing record as a whole, so either the full
    /// updated record is persisted or nothing changes.
    ///
    /// # Errors
    /// Returns error if encoding or the backend write fails.
    pub fn set<T: Serialize + ?Sized>(&self, path: &RecordPath, value: &T) -> StorageResult<()> {
        let encoded = serde_json::to_value(value)
            .map_err(|e| StorageError::encode_error(path.to_string(), e))?;
        self.set_value(path, encoded)
    }

    /// Store raw JSON `value` at `path`
    ///
    /// # Errors
    /// Returns error if encoding or the backend write fails.
    pub fn set_value(&self, path: &RecordPath, value: Value) -> StorageResult<()> {
        let record = path.record_name();
        let root = if path.is_record() {
            value
        } else {
            let mut root = self
                .read_record(record)?
                .unwrap_or_else(|| Value::Object(Map::new()));
            path.assign(&mut root, value);
            root
        };

        let text =
            serde_json::to_string(&root).map_err(|e| StorageError::encode_error(record, e))?;
        self.backend.write(&self.qualified(record), &text)?;
        tracing::debug!(%path, bytes = text.len(), "record written");
        Ok(())
    }

    /// Remove a whole record
    ///
    /// # Errors
    /// Returns error if the backend fails.
    pub fn remove(&self, record: &str) -> StorageResult<()> {
        self.backend.remove(&self.qualified(record))
    }

    /// Names of all records in this namespace, prefix stripped
    ///
    /// # Errors
    /// Returns error if the backend cannot be enumerated.
    pub fn record_names(&self) -> StorageResult<Vec<String>> {
        Ok(self
            .backend
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&self.prefix).map(str::to_string))
            .collect())
    }

    /// Remove every record in this namespace
    ///
    /// # Errors
    /// Returns error if the backend fails.
    pub fn clear_all(&self) -> StorageResult<()> {
        for record in self.record_names()? {
            self.remove(&record)?;
        }
        tracing::info!(prefix = %self.prefix, "namespace cleared");
        Ok(())
    }

    /// Every record as one pretty-printed JSON object keyed by record name
    ///
    /// Records whose text is not JSON are exported verbatim as strings.
    ///
    /// # Errors
    /// Returns error if the backend fails.
    pub fn export(&self) -> StorageResult<String> {
        let mut out = Map::new();
        for record in self.record_names()? {
            let Some(text) = self.backend.read(&self.qualified(&record))? else {
                continue;
            };
            let value = serde_json::from_str(&text).unwrap_or(Value::String(text));
            out.insert(record, value);
        }
        serde_json::to_string_pretty(&Value::Object(out))
            .map_err(|e| StorageError::encode_error("export", e))
    }

    /// Replace every record with the ones in `json`
    ///
    /// Records absent from the payload are left absent. If any write fails the
    /// previous records are restored.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidImport`] if `json` is not a JSON object,
    /// or the backend error that aborted the replacement.
    pub fn import(&self, json: &str) -> StorageResult<usize> {
        let parsed: Value = serde_json::from_str(json)
            .map_err(|e| StorageError::InvalidImport(e.to_string()))?;
        let Value::Object(records) = parsed else {
            return Err(StorageError::InvalidImport(
                "top-level value must be an object".to_string(),
            ));
        };

        let mut encoded = Vec::with_capacity(records.len());
        for (record, value) in &records {
            let text = serde_json::to_string(value)
                .map_err(|e| StorageError::encode_error(record.as_str(), e))?;
            encoded.push((record.as_str(), text));
        }

        let snapshot = self.snapshot()?;
        if let Err(e) = self.replace_all(&encoded) {
            tracing::warn!(error = %e, "import failed, restoring previous records");
            let previous: Vec<(&str, String)> = snapshot
                .iter()
                .map(|(record, text)| (record.as_str(), text.clone()))
                .collect();
            self.replace_all(&previous)?;
            return Err(e);
        }

        tracing::info!(records = encoded.len(), "records imported");
        Ok(encoded.len())
    }

    fn snapshot(&self) -> StorageResult<Vec<(String, String)>> {
        let mut out = Vec::new();
        for record in self.record_names()? {
            if let Some(text) = self.backend.read(&self.qualified(&record))? {
                out.push((record, text));
            }
        }
        Ok(out)
    }

    fn replace_all(&self, records: &[(&str, String)]) -> StorageResult<()> {
        self.clear_all()?;
        for (record, text) in records {
            self.backend.write(&self.qualified(record), text)?;
        }
        Ok(())
    }
}
