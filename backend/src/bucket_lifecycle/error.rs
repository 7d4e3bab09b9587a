//! Error types for bucket lifecycle operations

use aws_sdk_s3::{
    error::{ProvideErrorMetadata, SdkError},
    operation::{
        get_bucket_lifecycle_configuration::GetBucketLifecycleConfigurationError,
        put_bucket_lifecycle_configuration::PutBucketLifecycleConfigurationError,
    },
};
use thiserror::Error;

/// S3 error code for a missing bucket
pub(super) const NO_SUCH_BUCKET: &str = "NoSuchBucket";

/// S3 error code for a bucket without lifecycle rules
pub(super) const NO_SUCH_LIFECYCLE_CONFIGURATION: &str = "NoSuchLifecycleConfiguration";

/// Result type for bucket lifecycle operations
pub type BucketResult<T> = Result<T, BucketError>;

/// Errors that can occur during bucket lifecycle operations
#[derive(Error, Debug)]
pub enum BucketError {
    /// Bucket does not exist in the object store
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    /// S3 service error
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// AWS SDK error
    #[error("AWS SDK error: {0}")]
    AwsError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    UpstreamError(String),
}

impl BucketError {
    /// Maps an SDK failure on `bucket`, keeping missing buckets and 5xx apart
    fn from_sdk<E>(bucket: &str, error: SdkError<E>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
    {
        match error {
            SdkError::ServiceError(ref service_err) => {
                if service_err.err().code() == Some(NO_SUCH_BUCKET) {
                    Self::BucketNotFound(bucket.to_string())
                } else if service_err.raw().status().as_u16() >= 500 {
                    Self::UpstreamError(format!("{:?}", service_err.err()))
                } else {
                    Self::S3Error(format!("{:?}", service_err.err()))
                }
            }
            _ => Self::AwsError(error.to_string()),
        }
    }

    pub(super) fn from_get_lifecycle(
        bucket: &str,
        error: SdkError<GetBucketLifecycleConfigurationError>,
    ) -> Self {
        Self::from_sdk(bucket, error)
    }

    pub(super) fn from_put_lifecycle(
        bucket: &str,
        error: SdkError<PutBucketLifecycleConfigurationError>,
    ) -> Self {
        Self::from_sdk(bucket, error)
    }
}

impl From<aws_sdk_s3::error::BuildError> for BucketError {
    fn from(error: aws_sdk_s3::error::BuildError) -> Self {
        Self::ConfigError(error.to_string())
    }
}
