use aide::axum::IntoApiResponse;
use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::Serialize;

use crate::types::Environment;

#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    status: &'static str,
    /// Deployment stage the service runs in
    environment: String,
    /// Current version of the application
    semver: &'static str,
    /// Commit hash of the current build (if available)
    rev: Option<&'static str>,
}

/// Health check endpoint
pub async fn handler(Extension(environment): Extension<Environment>) -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok",
        environment: format!("{environment:?}").to_lowercase(),
        semver: env!("CARGO_PKG_VERSION"),
        rev: option_env!("GIT_REV"),
    })
}
