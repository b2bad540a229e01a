//! Error types for week addressing

/// Errors raised while parsing or computing week keys
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeekKeyError {
    /// Text is not of the form `YYYY-Www`
    #[error("malformed week key: '{0}'")]
    Malformed(String),

    /// Week number outside 1..=53
    #[error("week number {0} out of range (1..=53)")]
    WeekOutOfRange(u32),

    /// Date arithmetic left the representable calendar
    #[error("date out of range after shifting by {offset_weeks} weeks")]
    DateOutOfRange { offset_weeks: i32 },
}

/// Result type alias for week computations
pub type WeekResult<T> = Result<T, WeekKeyError>;
