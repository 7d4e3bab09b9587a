//! Retention policy computation for artifact buckets
//!
//! Converts between the expiration period a user asks for ("3 months") and the absolute
//! day count configured on a bucket lifecycle rule, enforcing the project retention limit.

#![deny(clippy::all, clippy::pedantic, clippy::nursery, missing_docs, dead_code)]

mod calculator;
mod clock;
mod error;
mod policy;
mod readable;

pub use calculator::{compute_expiration_days, RetentionPolicyCalculator};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{RetentionError, RetentionResult};
pub use policy::{ExpirationMeasure, RetentionCeiling, RetentionSpec, UNLIMITED_RETENTION};
pub use readable::ReadableRetention;
