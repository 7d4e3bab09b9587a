use aide::{axum::ApiRouter, openapi::OpenApi, scalar::Scalar};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json,
};

use crate::types::Environment;

/// Location of the generated OpenAPI document
pub const OPENAPI_PATH: &str = "/openapi.json";

pub fn handler() -> ApiRouter {
    let scalar = Scalar::new(OPENAPI_PATH).with_title("Artifacts Retention Docs");

    ApiRouter::new()
        .route("/docs", scalar.axum_route())
        .route(OPENAPI_PATH, get(openapi_document))
}

/// Serves the retention API document, hidden outside of dev/staging
#[allow(clippy::unused_async)]
async fn openapi_document(
    Extension(environment): Extension<Environment>,
    Extension(openapi): Extension<OpenApi>,
) -> Response {
    if environment.show_api_docs() {
        Json(openapi).into_response()
    } else {
        tracing::debug!("API docs requested in {environment:?}");
        StatusCode::NOT_FOUND.into_response()
    }
}
