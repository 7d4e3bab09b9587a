/// Bucket retention endpoints
pub mod retention;

use aide::axum::{routing::get, ApiRouter};

/// Creates the v1 API router with all v1 handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new().api_route(
        "/projects/{project_id}/buckets/{bucket}/retention",
        get(retention::get_retention_policy).put(retention::set_retention_policy),
    )
}
