//! Error types for the planner
//!
//! Every failure a planner operation can report falls into one of five kinds:
//! - [`PlannerError::NotFound`]: referenced week, food or list item is absent
//! - [`PlannerError::DuplicateFood`]: custom food collides with an existing name
//! - [`PlannerError::InvalidInput`]: empty names, malformed keys, bad indices
//! - [`PlannerError::SourceMissing`]: clone requested from a week with no data
//! - [`PlannerError::PersistenceFailure`]: the storage backend failed

use meal_calendar::{WeekKey, WeekKeyError};
use meal_catalog::CatalogError;
use meal_storage::StorageError;

/// Main planner error type
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// Referenced entity is absent
    #[error("not found: {0}")]
    NotFound(String),

    /// Custom food collides, ignoring case, with an existing name
    #[error("duplicate food: '{0}' already exists")]
    DuplicateFood(String),

    /// Input rejected before touching state
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Clone source week holds no data
    #[error("source week {0} has no stored menu")]
    SourceMissing(WeekKey),

    /// Storage backend failed
    #[error("persistence failure: {0}")]
    PersistenceFailure(#[source] StorageError),
}

impl PlannerError {
    /// Create not-found error
    #[inline]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create invalid-input error
    #[inline]
    pub fn invalid_input(why: impl Into<String>) -> Self {
        Self::InvalidInput(why.into())
    }

    /// Short machine-readable kind
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::DuplicateFood(_) => "duplicate_food",
            Self::InvalidInput(_) => "invalid_input",
            Self::SourceMissing(_) => "source_missing",
            Self::PersistenceFailure(_) => "persistence_failure",
        }
    }
}

impl From<StorageError> for PlannerError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidImport(why) => Self::InvalidInput(why),
            StorageError::Path(e) => Self::InvalidInput(e.to_string()),
            other => Self::PersistenceFailure(other),
        }
    }
}

impl From<CatalogError> for PlannerError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::EmptyName => Self::invalid_input("food name is empty"),
            CatalogError::DuplicateFood(name) => Self::DuplicateFood(name),
            CatalogError::PredefinedFood(name) => {
                Self::not_found(format!("'{name}' is predefined, not a custom food"))
            }
            CatalogError::UnknownCategory(key) => {
                Self::invalid_input(format!("unknown category '{key}'"))
            }
        }
    }
}

impl From<WeekKeyError> for PlannerError {
    fn from(err: WeekKeyError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
