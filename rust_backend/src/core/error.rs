//! Error types for observation calculations.

/// Result type for observation operations
pub type ObservationResult<T> = Result<T, ObservationError>;

/// Error type for observation operations.
///
/// Every variant carries enough detail (field, target, offending value) for a
/// caller to render a meaningful message without re-running the calculation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObservationError {
    #[error("Invalid date {year}-{month:02}-{day:02}: {reason}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        reason: String,
    },

    #[error("Invalid time of day {hour:02}:{minute:02}:{second:02}")]
    InvalidTimeOfDay { hour: u32, minute: u32, second: u32 },

    #[error("Invalid numeric input for '{field}': {value:?}")]
    InvalidNumericInput { field: String, value: String },

    #[error("Coordinate '{field}' out of range: {value}")]
    InvalidCoordinate { field: String, value: f64 },

    #[error("Catalog lookup failed for '{target}': {reason}")]
    CatalogLookup { target: String, reason: String },

    #[error("Timezone resolution failed: {reason}")]
    TimezoneResolution { reason: String },

    #[error("Batch of {requested} targets exceeds the limit of {limit}")]
    BatchTooLarge { requested: usize, limit: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ObservationError {
    /// Shorthand for an unparseable input field.
    pub fn numeric(field: &str, value: &str) -> Self {
        ObservationError::InvalidNumericInput {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Shorthand for an out-of-range coordinate.
    pub fn coordinate(field: &str, value: f64) -> Self {
        ObservationError::InvalidCoordinate {
            field: field.to_string(),
            value,
        }
    }

    /// Shorthand for a failed catalog lookup.
    pub fn catalog(target: &str, reason: impl Into<String>) -> Self {
        ObservationError::CatalogLookup {
            target: target.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by the external lookup services rather
    /// than by the caller's own input.
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            ObservationError::CatalogLookup { .. } | ObservationError::TimezoneResolution { .. }
        )
    }
}
