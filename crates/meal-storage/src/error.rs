//! Error types for the storage layer

use crate::path::PathError;
use std::path::PathBuf;

/// Errors raised by storage backends and the state store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error while touching a backing file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be encoded for writing
    #[error("failed to encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Import payload is not usable
    #[error("invalid import payload: {0}")]
    InvalidImport(String),

    /// Malformed record path
    #[error("invalid record path: {0}")]
    Path(#[from] PathError),

    /// Backend refused the operation
    #[error("backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create encode error for key
    pub fn encode_error(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Encode {
            key: key.into(),
            source,
        }
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = StorageError::io_error(
            "/tmp/x.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("io error on /tmp/x.json"));
    }

    #[test]
    fn path_error_conversion() {
        let err: StorageError = PathError::Empty.into();
        assert!(matches!(err, StorageError::Path(PathError::Empty)));
    }
}
