//! Error types for the food catalog

/// Errors raised by classification lookups and the custom food registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Food name is empty after trimming
    #[error("food name is empty")]
    EmptyName,

    /// Name collides, ignoring case, with a predefined or custom food
    #[error("food '{0}' already exists")]
    DuplicateFood(String),

    /// Predefined foods cannot be removed
    #[error("food '{0}' is predefined and cannot be removed")]
    PredefinedFood(String),

    /// Category key not in the predefined table
    #[error("unknown category: '{0}'")]
    UnknownCategory(String),
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_display() {
        let err = CatalogError::DuplicateFood("uova".to_string());
        assert_eq!(err.to_string(), "food 'uova' already exists");
    }
}
