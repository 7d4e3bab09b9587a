//! Bucket lifecycle (retention) configuration on the S3-compatible object store
mod error;

use std::sync::Arc;

use aws_sdk_s3::{
    error::{ProvideErrorMetadata, SdkError},
    operation::get_bucket_lifecycle_configuration::{
        GetBucketLifecycleConfigurationError, GetBucketLifecycleConfigurationOutput,
    },
    types::{
        BucketLifecycleConfiguration, ExpirationStatus, LifecycleExpiration, LifecycleRule,
        LifecycleRuleFilter,
    },
    Client as S3Client,
};
use tracing::{debug, info};

pub use error::{BucketError, BucketResult};
use error::NO_SUCH_LIFECYCLE_CONFIGURATION;

/// Identifier of the lifecycle rule managed by this service
pub const RETENTION_RULE_ID: &str = "retention";

/// Name of a project bucket in the shared object store
///
/// The same value is exposed to clients as the bucket id.
#[must_use]
pub fn project_bucket_name(project_id: u64, bucket: &str) -> String {
    format!("p--{project_id}.{bucket}")
}

/// Expiration of the first lifecycle rule, if it has one
#[must_use]
pub fn first_rule_expiration_days(rules: &[LifecycleRule]) -> Option<i32> {
    rules
        .first()
        .and_then(LifecycleRule::expiration)
        .and_then(LifecycleExpiration::days)
}

/// Expiration read from a lifecycle lookup, a missing configuration meaning no expiration
fn lifecycle_expiration_days(
    bucket: &str,
    result: Result<
        GetBucketLifecycleConfigurationOutput,
        SdkError<GetBucketLifecycleConfigurationError>,
    >,
) -> BucketResult<Option<i32>> {
    match result {
        Ok(output) => Ok(first_rule_expiration_days(output.rules())),
        Err(SdkError::ServiceError(service_err))
            if service_err.err().code() == Some(NO_SUCH_LIFECYCLE_CONFIGURATION) =>
        {
            debug!("No lifecycle configured for bucket: {bucket}");
            Ok(None)
        }
        Err(e) => Err(BucketError::from_get_lifecycle(bucket, e)),
    }
}

/// Reads and writes bucket expiration rules
#[async_trait::async_trait]
pub trait LifecycleStore: Send + Sync {
    /// Number of days objects in `bucket` are kept for, `None` if they never expire
    async fn expiration_days(&self, bucket: &str) -> BucketResult<Option<i32>>;

    /// Replaces the lifecycle of `bucket` with a single rule expiring objects after `days`
    async fn configure_expiration(&self, bucket: &str, days: u32) -> BucketResult<()>;
}

/// Lifecycle store backed by the S3 API
pub struct S3LifecycleStore {
    s3_client: Arc<S3Client>,
}

impl S3LifecycleStore {
    /// Creates a new lifecycle store
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>) -> Self {
        Self { s3_client }
    }

    fn retention_rule(days: u32) -> BucketResult<LifecycleRule> {
        let days = i32::try_from(days)
            .map_err(|_| BucketError::ConfigError(format!("Expiration too long: {days} days")))?;

        Ok(LifecycleRule::builder()
            .id(RETENTION_RULE_ID)
            .status(ExpirationStatus::Enabled)
            .filter(LifecycleRuleFilter::builder().prefix("").build())
            .expiration(LifecycleExpiration::builder().days(days).build())
            .build()?)
    }
}

#[async_trait::async_trait]
impl LifecycleStore for S3LifecycleStore {
    async fn expiration_days(&self, bucket: &str) -> BucketResult<Option<i32>> {
        let result = self
            .s3_client
            .get_bucket_lifecycle_configuration()
            .bucket(bucket)
            .send()
            .await;

        lifecycle_expiration_days(bucket, result)
    }

    async fn configure_expiration(&self, bucket: &str, days: u32) -> BucketResult<()> {
        let configuration = BucketLifecycleConfiguration::builder()
            .rules(Self::retention_rule(days)?)
            .build()?;

        self.s3_client
            .put_bucket_lifecycle_configuration()
            .bucket(bucket)
            .lifecycle_configuration(configuration)
            .send()
            .await
            .map_err(|e| BucketError::from_put_lifecycle(bucket, e))?;

        info!("Configured {days} days expiration for bucket: {bucket}");

        Ok(())
    }
}

/// Test doubles
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::collections::HashMap;

    use tokio::sync::RwLock;

    use super::{BucketError, BucketResult, LifecycleStore};

    /// In-memory lifecycle store holding the expiration of each known bucket
    #[derive(Default)]
    pub struct InMemoryLifecycleStore {
        buckets: RwLock<HashMap<String, Option<i32>>>,
    }

    impl InMemoryLifecycleStore {
        /// Creates a store containing `buckets`, none of which has a lifecycle yet
        #[must_use]
        pub fn with_buckets<I, S>(buckets: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                buckets: RwLock::new(buckets.into_iter().map(|b| (b.into(), None)).collect()),
            }
        }

        /// Sets the raw expiration of `bucket`, creating it if needed
        pub async fn set_expiration_days(&self, bucket: &str, days: Option<i32>) {
            self.buckets.write().await.insert(bucket.to_string(), days);
        }
    }

    #[async_trait::async_trait]
    impl LifecycleStore for InMemoryLifecycleStore {
        async fn expiration_days(&self, bucket: &str) -> BucketResult<Option<i32>> {
            self.buckets
                .read()
                .await
                .get(bucket)
                .copied()
                .ok_or_else(|| BucketError::BucketNotFound(bucket.to_string()))
        }

        async fn configure_expiration(&self, bucket: &str, days: u32) -> BucketResult<()> {
            let days = i32::try_from(days)
                .map_err(|_| BucketError::ConfigError(format!("Expiration too long: {days} days")))?;

            match self.buckets.write().await.get_mut(bucket) {
                Some(expiration) => {
                    *expiration = Some(days);
                    Ok(())
                }
                None => Err(BucketError::BucketNotFound(bucket.to_string())),
            }
        }
    }
}
