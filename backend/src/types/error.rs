//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use retention::RetentionError;
use schemars::JsonSchema;
use serde::Serialize;

use crate::{bucket_lifecycle::BucketError, project_api::ProjectLookupError};

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(
        status: StatusCode,
        code: &'static str,
        msg: &'static str,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody { code, message: msg },
            },
        }
    }

    /// Create a `400 BAD_REQUEST` error that should not be retried
    #[must_use]
    pub const fn bad_request(code: &'static str, msg: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, msg, false)
    }

    /// HTTP status of the error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.inner.error.code
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert retention policy errors to application errors
impl From<RetentionError> for AppError {
    fn from(err: RetentionError) -> Self {
        match &err {
            RetentionError::PolicyExceeded { days, ceiling } => {
                tracing::debug!("Retention of {days} days exceeds project limit of {ceiling}");
                Self::new(
                    StatusCode::FORBIDDEN,
                    "retention_limit_exceeded",
                    "The data retention limit allowed in the project has been exceeded",
                    false,
                )
            }
            RetentionError::InvalidValue(_) | RetentionError::OutOfRange { .. } => {
                tracing::debug!("Invalid retention period: {err}");
                Self::bad_request("invalid_retention", "Invalid retention period provided")
            }
            RetentionError::InvalidCeiling(limit) => {
                tracing::error!("Project has an invalid data retention limit: {limit}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                    false,
                )
            }
        }
    }
}

/// Convert bucket errors to application errors
impl From<BucketError> for AppError {
    #[allow(clippy::cognitive_complexity)]
    fn from(err: BucketError) -> Self {
        use BucketError::{AwsError, BucketNotFound, ConfigError, S3Error, UpstreamError};

        match &err {
            BucketNotFound(bucket) => {
                tracing::debug!("Bucket not found: {bucket}");
                Self::new(
                    StatusCode::NOT_FOUND,
                    "bucket_not_found",
                    "Bucket not found",
                    false,
                )
            }
            UpstreamError(msg) => {
                tracing::error!("S3 upstream error: {msg}");
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "upstream_error",
                    "Object storage temporarily unavailable",
                    true,
                )
            }
            S3Error(msg) | AwsError(msg) => {
                tracing::error!("S3/AWS error: {msg}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                    true,
                )
            }
            ConfigError(msg) => {
                tracing::error!("Configuration error: {msg}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                    false,
                )
            }
        }
    }
}

/// Convert project lookup errors to application errors
impl From<ProjectLookupError> for AppError {
    fn from(err: ProjectLookupError) -> Self {
        match &err {
            ProjectLookupError::NotFound(project_id) => {
                tracing::debug!("Project not found: {project_id}");
                Self::new(
                    StatusCode::NOT_FOUND,
                    "project_not_found",
                    "Project not found",
                    false,
                )
            }
            ProjectLookupError::ServiceError(_) | ProjectLookupError::Request(_) => {
                tracing::error!("Project lookup failed: {err}");
                Self::new(
                    StatusCode::BAD_GATEWAY,
                    "project_service_error",
                    "Project service error",
                    true,
                )
            }
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
