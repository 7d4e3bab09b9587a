use std::sync::Arc;

use artifacts_backend::{
    bucket_lifecycle::S3LifecycleStore, project_api::ProjectApiClient, server, types::Environment,
};
use aws_sdk_s3::Client as S3Client;
use retention::{RetentionPolicyCalculator, SystemClock};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(environment.tracing_level()).into())
        .from_env_lossy();

    // JSON logs for staging/production, human-readable for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(env_filter).init();
        }
        Environment::Development => {
            fmt().with_env_filter(env_filter).init();
        }
    }

    info!("Starting artifacts retention service in {environment:?} environment");

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let lifecycle_store = Arc::new(S3LifecycleStore::new(s3_client));

    info!("✅ Initialized S3 lifecycle store");

    let project_lookup = Arc::new(ProjectApiClient::new(environment.project_service_url())?);

    info!("✅ Initialized project service client");

    let calculator = Arc::new(RetentionPolicyCalculator::new(Arc::new(SystemClock)));

    server::start(environment, project_lookup, lifecycle_store, calculator).await
}
