use healthhub_core::{HealthHubRepositories, HealthHubService};

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    pub service: HealthHubService,
}

impl AppState {
    pub fn new(service: HealthHubService) -> Self {
        Self { service }
    }

    /// Shutdown the underlying database pool
    pub async fn shutdown(&self) {
        self.service.shutdown_pool().await
    }
}

impl From<HealthHubRepositories> for AppState {
    fn from(repositories: HealthHubRepositories) -> Self {
        AppState::new(repositories.into())
    }
}
