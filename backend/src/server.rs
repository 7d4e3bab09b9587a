use std::sync::Arc;

use aide::openapi::OpenApi;
use axum::Extension;
use datadog_tracing::axum::{shutdown_signal, OtelAxumLayer, OtelInResponseLayer};
use retention::RetentionPolicyCalculator;
use tokio::net::TcpListener;

use crate::routes;
use crate::{bucket_lifecycle::LifecycleStore, project_api::ProjectLookup, types::Environment};

/// Port used when `PORT` is not set
const DEFAULT_PORT: u16 = 8001;

/// Builds the application router with all dependencies attached
#[must_use]
pub fn router(
    environment: Environment,
    project_lookup: Arc<dyn ProjectLookup>,
    lifecycle_store: Arc<dyn LifecycleStore>,
    calculator: Arc<RetentionPolicyCalculator>,
) -> axum::Router {
    let mut openapi = OpenApi::default();

    routes::handler()
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(project_lookup))
        .layer(Extension(lifecycle_store))
        .layer(Extension(calculator))
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    project_lookup: Arc<dyn ProjectLookup>,
    lifecycle_store: Arc<dyn LifecycleStore>,
    calculator: Arc<RetentionPolicyCalculator>,
) -> anyhow::Result<()> {
    let router = router(environment, project_lookup, lifecycle_store, calculator)
        // Include trace context as header into the response
        .layer(OtelInResponseLayer)
        // Start OpenTelemetry trace on incoming request
        .layer(OtelAxumLayer::default())
        .layer(tower_http::timeout::TimeoutLayer::new(
            std::time::Duration::from_secs(30),
        ));

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(DEFAULT_PORT), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Artifacts retention service started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}
