//! Retention policy inputs

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{RetentionError, RetentionResult};

/// Raw project limit meaning "no ceiling"
pub const UNLIMITED_RETENTION: i64 = -1;

/// Calendar unit of an expiration period
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExpirationMeasure {
    /// Exact days
    Days,
    /// Seven-day weeks
    Weeks,
    /// Calendar months
    Months,
    /// Calendar years
    Years,
}

/// Expiration period requested for a bucket, e.g. "3 months"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionSpec {
    measure: ExpirationMeasure,
    value: u32,
}

impl RetentionSpec {
    /// Creates a spec from a measure and a raw amount
    ///
    /// # Errors
    ///
    /// Returns `RetentionError::InvalidValue` if `value` is not a positive integer that fits
    /// into `u32`
    pub fn new(measure: ExpirationMeasure, value: i64) -> RetentionResult<Self> {
        let value = u32::try_from(value)
            .ok()
            .filter(|value| *value > 0)
            .ok_or(RetentionError::InvalidValue(value))?;

        Ok(Self { measure, value })
    }

    /// Unit of the period
    #[must_use]
    pub const fn measure(&self) -> ExpirationMeasure {
        self.measure
    }

    /// Number of units, always positive
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }
}

/// Maximum retention a project may configure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionCeiling {
    /// Any retention period is allowed
    Unlimited,
    /// At most this many days
    Days(u32),
}

impl RetentionCeiling {
    /// Interprets the raw data retention limit stored on a project.
    ///
    /// `None` means that no ceiling is configured. `0` is a finite ceiling that allows no
    /// retention at all.
    ///
    /// # Errors
    ///
    /// Returns `RetentionError::InvalidCeiling` for negative limits other than `-1`
    pub fn from_limit(limit: Option<i64>) -> RetentionResult<Option<Self>> {
        match limit {
            None => Ok(None),
            Some(UNLIMITED_RETENTION) => Ok(Some(Self::Unlimited)),
            Some(days) => u32::try_from(days)
                .map(|days| Some(Self::Days(days)))
                .map_err(|_| RetentionError::InvalidCeiling(days)),
        }
    }

    /// Day count of a finite ceiling
    #[must_use]
    pub const fn days(&self) -> Option<u32> {
        match self {
            Self::Unlimited => None,
            Self::Days(days) => Some(*days),
        }
    }

    /// Day count applied when no period is requested, `None` for unlimited and `0`
    #[must_use]
    pub const fn default_days(&self) -> Option<u32> {
        match self {
            Self::Days(days) if *days > 0 => Some(*days),
            _ => None,
        }
    }
}
