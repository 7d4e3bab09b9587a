//! Error types for retention policy computation

use thiserror::Error;

use crate::ExpirationMeasure;

/// Result type for retention operations
pub type RetentionResult<T> = Result<T, RetentionError>;

/// Errors that can occur while computing a retention period
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RetentionError {
    /// Computed retention is longer than the project allows
    #[error("Retention of {days} days exceeds the project limit of {ceiling} days")]
    PolicyExceeded {
        /// Computed expiration in days
        days: u32,
        /// Maximum number of days allowed by the project
        ceiling: u32,
    },

    /// Expiration value is zero or negative
    #[error("Expiration value must be a positive integer, got {0}")]
    InvalidValue(i64),

    /// Project carries a retention limit that is neither `-1` nor a day count
    #[error("Invalid data retention limit: {0}")]
    InvalidCeiling(i64),

    /// Expiration date cannot be represented
    #[error("Expiration of {value} {measure} is out of range")]
    OutOfRange {
        /// Requested unit
        measure: ExpirationMeasure,
        /// Requested amount of units
        value: u32,
    },
}
