mod error;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::{Deserialize, Serialize};

pub use error::{ProjectLookupError, ProjectLookupResult};

/// Default request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// Project as returned by the project service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier
    pub id: u64,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Maximum retention in days, `-1` for unlimited, `0`/absent when not configured
    #[serde(default)]
    pub data_retention_limit: Option<i64>,
}

/// Trait for resolving projects by id
#[async_trait::async_trait]
pub trait ProjectLookup: Send + Sync {
    /// Fetches a project
    ///
    /// Returns `ProjectLookupError::NotFound` when the project does not exist.
    async fn get_project(&self, project_id: u64) -> ProjectLookupResult<Project>;
}

/// HTTP client to the project service
pub struct ProjectApiClient {
    project_service_url: String,
    http_client: ClientWithMiddleware,
}

impl ProjectApiClient {
    /// Creates a new project service client
    ///
    /// # Errors
    ///
    /// Returns `ProjectLookupError::Request` if the HTTP client cannot be built
    pub fn new(project_service_url: String) -> ProjectLookupResult<Self> {
        let reqwest_client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .build()?;

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            project_service_url,
            http_client,
        })
    }
}

#[async_trait::async_trait]
impl ProjectLookup for ProjectApiClient {
    async fn get_project(&self, project_id: u64) -> ProjectLookupResult<Project> {
        let url = format!("{}/v1/projects/{project_id}", self.project_service_url);

        let response = self.http_client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ProjectLookupError::NotFound(project_id)),
            status if !status.is_success() => {
                Err(ProjectLookupError::ServiceError(status.as_u16()))
            }
            _ => Ok(response.json::<Project>().await?),
        }
    }
}

/// Test doubles
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::collections::HashMap;

    use super::{Project, ProjectLookup, ProjectLookupError, ProjectLookupResult};

    /// Project lookup serving a fixed set of projects
    #[derive(Default)]
    pub struct MockProjectLookup {
        projects: HashMap<u64, Project>,
    }

    impl MockProjectLookup {
        /// Creates an empty lookup
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds a project with the given retention limit
        #[must_use]
        pub fn with_project(mut self, id: u64, data_retention_limit: Option<i64>) -> Self {
            self.projects.insert(
                id,
                Project {
                    id,
                    name: format!("project-{id}"),
                    data_retention_limit,
                },
            );
            self
        }
    }

    #[async_trait::async_trait]
    impl ProjectLookup for MockProjectLookup {
        async fn get_project(&self, project_id: u64) -> ProjectLookupResult<Project> {
            self.projects
                .get(&project_id)
                .cloned()
                .ok_or(ProjectLookupError::NotFound(project_id))
        }
    }
}
