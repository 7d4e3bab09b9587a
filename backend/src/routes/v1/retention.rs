use std::sync::{Arc, LazyLock};

use axum::{Extension, Json};
use regex::Regex;
use retention::{
    ExpirationMeasure, ReadableRetention, RetentionCeiling, RetentionPolicyCalculator,
    RetentionResult, RetentionSpec,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{
    bucket_lifecycle::{project_bucket_name, LifecycleStore},
    project_api::ProjectLookup,
    types::{AppError, ValidatedJson, ValidatedPath},
};

#[allow(clippy::expect_used)]
static BUCKET_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$").expect("bucket name regex is valid")
});

/// Path of a project bucket
#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct BucketPath {
    /// Project owning the bucket
    pub project_id: u64,
    /// Bucket name without the project prefix
    #[validate(regex(path = *BUCKET_NAME_REGEX))]
    pub bucket: String,
}

/// Request to change the retention of a bucket
///
/// Both fields must be given for the period to apply. Without them the bucket gets the
/// project retention limit.
#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct RetentionRequest {
    /// Unit of the expiration period
    pub expiration_measure: Option<ExpirationMeasure>,
    /// Number of units, at least 1
    #[validate(range(min = 1))]
    pub expiration_value: Option<i64>,
}

impl RetentionRequest {
    fn spec(&self) -> RetentionResult<Option<RetentionSpec>> {
        match (self.expiration_measure, self.expiration_value) {
            (Some(measure), Some(value)) => RetentionSpec::new(measure, value).map(Some),
            _ => Ok(None),
        }
    }
}

/// Current retention of a bucket
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RetentionPolicyResponse {
    /// Bucket id in the object store
    pub id: String,
    /// Expiration in display units, `null` if objects never expire
    pub retention_policy: Option<ReadableRetention>,
    /// Raw expiration in days, `null` if objects never expire
    pub expiration_days: Option<i32>,
    /// Project retention limit in days, `-1` for unlimited
    pub data_retention_limit: Option<i64>,
}

/// Retention applied to a bucket
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RetentionUpdateResponse {
    /// Bucket id in the object store
    pub id: String,
    /// Configured expiration in days
    pub expiration_days: u32,
    /// Configured expiration in display units
    pub retention_policy: ReadableRetention,
}

/// Get the retention policy of a bucket
///
/// Reads the expiration of the first lifecycle rule of the bucket.
///
/// # Errors
///
/// - `404 NOT_FOUND` - Project or bucket does not exist
/// - `502 BAD_GATEWAY` - Project service failure
/// - `503 SERVICE_UNAVAILABLE` - Object store unavailable
#[instrument(skip_all)]
pub async fn get_retention_policy(
    Extension(project_lookup): Extension<Arc<dyn ProjectLookup>>,
    Extension(lifecycle_store): Extension<Arc<dyn LifecycleStore>>,
    ValidatedPath(path): ValidatedPath<BucketPath>,
) -> Result<Json<RetentionPolicyResponse>, AppError> {
    let project = project_lookup.get_project(path.project_id).await?;
    let bucket_id = project_bucket_name(path.project_id, &path.bucket);

    let expiration_days = lifecycle_store.expiration_days(&bucket_id).await?;

    Ok(Json(RetentionPolicyResponse {
        id: bucket_id,
        retention_policy: expiration_days
            .map(|days| RetentionPolicyCalculator::to_readable_retention(i64::from(days))),
        expiration_days,
        data_retention_limit: project.data_retention_limit,
    }))
}

/// Set the retention policy of a bucket
///
/// Converts the requested period into days, checks it against the project retention
/// limit and replaces the bucket lifecycle with a single expiration rule.
///
/// # Errors
///
/// - `400 BAD_REQUEST` - Invalid period, or no period and no project limit to fall back to
/// - `403 FORBIDDEN` - Period exceeds the project retention limit
/// - `404 NOT_FOUND` - Project or bucket does not exist
/// - `502 BAD_GATEWAY` - Project service failure
/// - `503 SERVICE_UNAVAILABLE` - Object store unavailable
#[instrument(skip_all)]
pub async fn set_retention_policy(
    Extension(project_lookup): Extension<Arc<dyn ProjectLookup>>,
    Extension(lifecycle_store): Extension<Arc<dyn LifecycleStore>>,
    Extension(calculator): Extension<Arc<RetentionPolicyCalculator>>,
    ValidatedPath(path): ValidatedPath<BucketPath>,
    ValidatedJson(payload): ValidatedJson<RetentionRequest>,
) -> Result<Json<RetentionUpdateResponse>, AppError> {
    let project = project_lookup.get_project(path.project_id).await?;
    let ceiling = RetentionCeiling::from_limit(project.data_retention_limit)?;
    let spec = payload.spec()?;

    let expiration_days = calculator
        .compute_expiration_days(spec.as_ref(), ceiling)?
        .ok_or_else(|| {
            AppError::bad_request(
                "retention_not_specified",
                "The data retention limit not specified or provided data is not correct",
            )
        })?;

    let bucket_id = project_bucket_name(path.project_id, &path.bucket);
    lifecycle_store
        .configure_expiration(&bucket_id, expiration_days)
        .await?;

    tracing::info!("Set retention of {bucket_id} to {expiration_days} days");

    Ok(Json(RetentionUpdateResponse {
        id: bucket_id,
        expiration_days,
        retention_policy: RetentionPolicyCalculator::to_readable_retention(i64::from(
            expiration_days,
        )),
    }))
}
