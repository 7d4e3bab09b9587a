use std::sync::Arc;

use artifacts_backend::{
    bucket_lifecycle::mock::InMemoryLifecycleStore, project_api::mock::MockProjectLookup,
    server, types::Environment,
};
use axum::{body::Body, http::Request, response::Response, Router};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use retention::{FixedClock, RetentionPolicyCalculator};
use tower::ServiceExt;

/// Date every test computes retention periods from
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    // Load test environment variables
    dotenvy::from_path(".env.example").ok();

    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router wired to in-memory dependencies
pub struct TestSetup {
    pub router: Router,
    pub lifecycle_store: Arc<InMemoryLifecycleStore>,
}

impl TestSetup {
    pub fn new(project_lookup: MockProjectLookup, lifecycle_store: InMemoryLifecycleStore) -> Self {
        setup_test_env();

        let lifecycle_store = Arc::new(lifecycle_store);
        let calculator = Arc::new(RetentionPolicyCalculator::new(Arc::new(FixedClock(
            test_today(),
        ))));

        let router = server::router(
            Environment::Development,
            Arc::new(project_lookup),
            lifecycle_store.clone(),
            calculator,
        );

        Self {
            router,
            lifecycle_store,
        }
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_put_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        self.send_put_body(route, payload.to_string()).await
    }

    pub async fn send_put_body(
        &self,
        route: &str,
        body: String,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("PUT")
            .header("Content-Type", "application/json")
            .body(Body::from(body))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
