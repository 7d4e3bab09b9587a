//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use tracing::Level;

/// Default object store endpoint for development (local `MinIO`)
const DEVELOPMENT_S3_ENDPOINT_URL: &str = "http://localhost:9000";

/// Default project service endpoint for development
const DEVELOPMENT_PROJECT_SERVICE_URL: &str = "http://localhost:8080";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses a local `MinIO`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Returns the endpoint URL of the S3-compatible object store, if not AWS itself
    #[must_use]
    pub fn override_s3_endpoint_url(&self) -> Option<String> {
        env::var("S3_ENDPOINT_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| match self {
                Self::Production | Self::Staging => None,
                Self::Development => Some(DEVELOPMENT_S3_ENDPOINT_URL.to_string()),
            })
    }

    /// Returns the base URL of the project service
    ///
    /// # Panics
    ///
    /// Panics if the `PROJECT_SERVICE_URL` environment variable is not set outside development
    #[must_use]
    pub fn project_service_url(&self) -> String {
        let url = match self {
            Self::Production | Self::Staging => env::var("PROJECT_SERVICE_URL")
                .expect("PROJECT_SERVICE_URL environment variable is not set"),
            Self::Development => env::var("PROJECT_SERVICE_URL")
                .unwrap_or_else(|_| DEVELOPMENT_PROJECT_SERVICE_URL.to_string()),
        };

        url.trim_end_matches('/').to_string()
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config)
            .build()
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // S3-compatible stores (MinIO) only support path style addressing
        if let Some(endpoint_url) = self.override_s3_endpoint_url() {
            builder.set_endpoint_url(Some(endpoint_url));
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// Log level used when `RUST_LOG` is not set
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_environment_from_env() {
        // Test development (default)
        env::remove_var("APP_ENV");
        assert_eq!(Environment::from_env(), Environment::Development);

        // Test explicit development
        env::set_var("APP_ENV", "development");
        assert_eq!(Environment::from_env(), Environment::Development);

        // Test staging
        env::set_var("APP_ENV", "staging");
        assert_eq!(Environment::from_env(), Environment::Staging);

        // Test production, case and whitespace insensitive
        env::set_var("APP_ENV", " Production ");
        assert_eq!(Environment::from_env(), Environment::Production);

        env::remove_var("APP_ENV");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "Invalid environment: invalid")]
    fn test_invalid_environment() {
        env::set_var("APP_ENV", "invalid");
        let _ = Environment::from_env();
    }

    #[test]
    #[serial]
    fn test_s3_endpoint_url() {
        env::remove_var("S3_ENDPOINT_URL");
        assert_eq!(
            Environment::Development.override_s3_endpoint_url(),
            Some("http://localhost:9000".to_string())
        );
        assert_eq!(Environment::Production.override_s3_endpoint_url(), None);

        // Explicit endpoint applies to every environment
        env::set_var("S3_ENDPOINT_URL", "https://minio.internal:9000");
        assert_eq!(
            Environment::Production.override_s3_endpoint_url(),
            Some("https://minio.internal:9000".to_string())
        );

        env::remove_var("S3_ENDPOINT_URL");
    }

    #[test]
    #[serial]
    fn test_project_service_url() {
        env::remove_var("PROJECT_SERVICE_URL");
        assert_eq!(
            Environment::Development.project_service_url(),
            "http://localhost:8080"
        );

        env::set_var("PROJECT_SERVICE_URL", "https://projects.internal/");
        assert_eq!(
            Environment::Staging.project_service_url(),
            "https://projects.internal"
        );

        env::remove_var("PROJECT_SERVICE_URL");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "PROJECT_SERVICE_URL environment variable is not set")]
    fn test_project_service_url_required_in_production() {
        env::remove_var("PROJECT_SERVICE_URL");
        let _ = Environment::Production.project_service_url();
    }

    #[test]
    #[serial]
    fn test_tracing_level() {
        env::remove_var("TRACING_LEVEL");
        assert_eq!(Environment::Production.tracing_level(), Level::INFO);
        assert_eq!(Environment::Development.tracing_level(), Level::DEBUG);

        env::set_var("TRACING_LEVEL", "warn");
        assert_eq!(Environment::Production.tracing_level(), Level::WARN);

        env::remove_var("TRACING_LEVEL");
    }
}
