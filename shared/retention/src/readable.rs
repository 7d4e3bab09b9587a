//! Display form of a lifecycle expiration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExpirationMeasure;

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: i64 = 31;
const DAYS_PER_WEEK: i64 = 7;

/// Expiration expressed in the largest unit that divides the day count evenly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReadableRetention {
    /// Unit of the period
    pub expiration_measure: ExpirationMeasure,
    /// Number of units
    pub expiration_value: i64,
}

impl ReadableRetention {
    /// Classifies a lifecycle day count for display.
    ///
    /// Uses fixed 365/31/7 day units, so it does not invert calendar arithmetic:
    /// 12 calendar months come back as one year only when they span 365 days,
    /// across a leap day they are reported as 366 plain days.
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        let (expiration_measure, expiration_value) = if days > 0 && days % DAYS_PER_YEAR == 0 {
            (ExpirationMeasure::Years, days / DAYS_PER_YEAR)
        } else if days > 0 && days % DAYS_PER_MONTH == 0 {
            (ExpirationMeasure::Months, days / DAYS_PER_MONTH)
        } else if days > 0 && days % DAYS_PER_WEEK == 0 {
            (ExpirationMeasure::Weeks, days / DAYS_PER_WEEK)
        } else {
            (ExpirationMeasure::Days, days)
        };

        Self {
            expiration_measure,
            expiration_value,
        }
    }
}
