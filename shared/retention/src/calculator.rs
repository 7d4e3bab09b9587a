//! Conversion of expiration periods into lifecycle day counts

use std::sync::Arc;

use chrono::{Days, Months, NaiveDate};

use crate::{
    Clock, ExpirationMeasure, ReadableRetention, RetentionCeiling, RetentionError,
    RetentionResult, RetentionSpec, SystemClock,
};

/// Computes bucket expiration periods against a project ceiling
#[derive(Clone)]
pub struct RetentionPolicyCalculator {
    clock: Arc<dyn Clock>,
}

impl RetentionPolicyCalculator {
    /// Creates a calculator reading the current date from `clock`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Resolves the number of days objects are kept for.
    ///
    /// Without a spec a positive finite project ceiling is used as the default. `Ok(None)`
    /// means no expiration could be resolved.
    ///
    /// # Errors
    ///
    /// Returns `RetentionError::PolicyExceeded` if the computed period is longer than a
    /// finite ceiling
    /// Returns `RetentionError::OutOfRange` if the expiration date cannot be represented
    pub fn compute_expiration_days(
        &self,
        spec: Option<&RetentionSpec>,
        ceiling: Option<RetentionCeiling>,
    ) -> RetentionResult<Option<u32>> {
        compute_expiration_days(self.clock.today(), spec, ceiling)
    }

    /// Display form of a lifecycle day count
    #[must_use]
    pub const fn to_readable_retention(days: i64) -> ReadableRetention {
        ReadableRetention::from_days(days)
    }
}

impl Default for RetentionPolicyCalculator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

/// [`RetentionPolicyCalculator::compute_expiration_days`] from an explicit date
///
/// # Errors
///
/// See [`RetentionPolicyCalculator::compute_expiration_days`]
pub fn compute_expiration_days(
    today: NaiveDate,
    spec: Option<&RetentionSpec>,
    ceiling: Option<RetentionCeiling>,
) -> RetentionResult<Option<u32>> {
    let Some(spec) = spec else {
        return Ok(ceiling.as_ref().and_then(RetentionCeiling::default_days));
    };

    let days = days_until_expiration(today, spec)?;

    if let Some(RetentionCeiling::Days(ceiling)) = ceiling {
        if days > ceiling {
            return Err(RetentionError::PolicyExceeded { days, ceiling });
        }
    }

    Ok(Some(days))
}

fn days_until_expiration(today: NaiveDate, spec: &RetentionSpec) -> RetentionResult<u32> {
    let value = spec.value();
    let expiration_date = match spec.measure() {
        ExpirationMeasure::Days => today.checked_add_days(Days::new(u64::from(value))),
        ExpirationMeasure::Weeks => today.checked_add_days(Days::new(u64::from(value) * 7)),
        ExpirationMeasure::Months => today.checked_add_months(Months::new(value)),
        ExpirationMeasure::Years => value
            .checked_mul(12)
            .and_then(|months| today.checked_add_months(Months::new(months))),
    };

    expiration_date
        .and_then(|date| u32::try_from((date - today).num_days()).ok())
        .ok_or(RetentionError::OutOfRange {
            measure: spec.measure(),
            value,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn spec(measure: ExpirationMeasure, value: i64) -> RetentionSpec {
        RetentionSpec::new(measure, value).unwrap()
    }

    #[test]
    fn test_days_and_weeks_are_exact() {
        let today = date(2025, 3, 10);
        assert_eq!(
            compute_expiration_days(today, Some(&spec(ExpirationMeasure::Days, 45)), None),
            Ok(Some(45))
        );
        assert_eq!(
            compute_expiration_days(today, Some(&spec(ExpirationMeasure::Weeks, 3)), None),
            Ok(Some(21))
        );
    }

    #[test]
    fn test_months_follow_calendar() {
        // February 2025 has 28 days
        assert_eq!(
            compute_expiration_days(
                date(2025, 2, 1),
                Some(&spec(ExpirationMeasure::Months, 1)),
                None
            ),
            Ok(Some(28))
        );
        assert_eq!(
            compute_expiration_days(
                date(2025, 7, 1),
                Some(&spec(ExpirationMeasure::Months, 1)),
                None
            ),
            Ok(Some(31))
        );
    }

    #[test]
    fn test_month_end_is_clamped() {
        // Jan 31 + 1 month lands on Feb 28
        assert_eq!(
            compute_expiration_days(
                date(2025, 1, 31),
                Some(&spec(ExpirationMeasure::Months, 1)),
                None
            ),
            Ok(Some(28))
        );
    }

    #[test]
    fn test_years_account_for_leap_days() {
        assert_eq!(
            compute_expiration_days(
                date(2025, 6, 1),
                Some(&spec(ExpirationMeasure::Years, 1)),
                None
            ),
            Ok(Some(365))
        );
        assert_eq!(
            compute_expiration_days(
                date(2027, 6, 1),
                Some(&spec(ExpirationMeasure::Years, 1)),
                None
            ),
            Ok(Some(366))
        );
        // Feb 29 + 1 year lands on Feb 28
        assert_eq!(
            compute_expiration_days(
                date(2028, 2, 29),
                Some(&spec(ExpirationMeasure::Years, 1)),
                None
            ),
            Ok(Some(365))
        );
    }

    #[test]
    fn test_ceiling_exceeded() {
        let result = compute_expiration_days(
            date(2025, 3, 10),
            Some(&spec(ExpirationMeasure::Days, 45)),
            Some(RetentionCeiling::Days(30)),
        );
        assert_eq!(
            result,
            Err(RetentionError::PolicyExceeded {
                days: 45,
                ceiling: 30
            })
        );
    }

    #[test]
    fn test_ceiling_is_inclusive() {
        assert_eq!(
            compute_expiration_days(
                date(2025, 3, 10),
                Some(&spec(ExpirationMeasure::Days, 30)),
                Some(RetentionCeiling::Days(30)),
            ),
            Ok(Some(30))
        );
    }

    #[test]
    fn test_unlimited_ceiling_skips_check() {
        assert_eq!(
            compute_expiration_days(
                date(2025, 3, 10),
                Some(&spec(ExpirationMeasure::Days, 10_000)),
                Some(RetentionCeiling::Unlimited),
            ),
            Ok(Some(10_000))
        );
    }

    #[test]
    fn test_missing_spec_defaults_to_ceiling() {
        let today = date(2025, 3, 10);
        assert_eq!(
            compute_expiration_days(today, None, Some(RetentionCeiling::Days(90))),
            Ok(Some(90))
        );
        assert_eq!(
            compute_expiration_days(today, None, Some(RetentionCeiling::Unlimited)),
            Ok(None)
        );
        assert_eq!(compute_expiration_days(today, None, None), Ok(None));
    }

    #[test]
    fn test_zero_ceiling_allows_no_retention() {
        let today = date(2025, 3, 10);
        assert_eq!(
            compute_expiration_days(today, None, Some(RetentionCeiling::Days(0))),
            Ok(None)
        );
        assert_eq!(
            compute_expiration_days(
                today,
                Some(&spec(ExpirationMeasure::Days, 1)),
                Some(RetentionCeiling::Days(0)),
            ),
            Err(RetentionError::PolicyExceeded {
                days: 1,
                ceiling: 0
            })
        );
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            compute_expiration_days(
                NaiveDate::MAX,
                Some(&spec(ExpirationMeasure::Days, 1)),
                None
            ),
            Err(RetentionError::OutOfRange {
                measure: ExpirationMeasure::Days,
                value: 1
            })
        );
    }
}
