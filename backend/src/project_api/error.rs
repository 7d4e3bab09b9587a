//! Error types for project lookups

use thiserror::Error;

/// Result type for project lookups
pub type ProjectLookupResult<T> = Result<T, ProjectLookupError>;

/// Errors that can occur while resolving a project
#[derive(Debug, Error)]
pub enum ProjectLookupError {
    /// No project with this id
    #[error("Project not found: {0}")]
    NotFound(u64),

    /// Project service answered with a non-success status
    #[error("Project service returned status {0}")]
    ServiceError(u16),

    /// Request could not be sent or its response could not be decoded
    #[error("Project service request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for ProjectLookupError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error.to_string())
    }
}

impl From<reqwest_middleware::Error> for ProjectLookupError {
    fn from(error: reqwest_middleware::Error) -> Self {
        Self::Request(error.to_string())
    }
}
