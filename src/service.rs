use crate::aggregator::fetch_repository_detail;
use crate::error::{Result, TrendingError};
use crate::github::{ClientConfig, GitHubClient};
use crate::models::{RepositoryDetail, RepositoryId, SearchWindow};
use crate::search::search_repositories;
use crate::types::RepositorySummary;
use chrono::{NaiveDate, Utc};
use std::future::Future;
use std::time::Duration;

/// The two operations offered to the presentation layer.
///
/// Each call is independent: nothing is cached and no state is shared
/// between calls.
pub struct ProjectService {
    client: GitHubClient,
    operation_timeout: Duration,
}

impl ProjectService {
    pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_client(GitHubClient::new(config)?))
    }

    pub fn with_client(client: GitHubClient) -> Self {
        ProjectService {
            client,
            operation_timeout: Self::DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Repositories created in the last seven days, by stars descending.
    pub async fn search(&self) -> Result<Vec<RepositorySummary>> {
        self.search_as_of(Utc::now().date_naive()).await
    }

    /// [`search`](Self::search) with an explicit "today".
    pub async fn search_as_of(&self, today: NaiveDate) -> Result<Vec<RepositorySummary>> {
        let window = SearchWindow::ending_on(today);
        self.bounded(search_repositories(&self.client, window)).await
    }

    pub async fn fetch_detail(&self, id: &str) -> Result<RepositoryDetail> {
        let id = RepositoryId::parse(id)?;
        self.bounded(fetch_repository_detail(&self.client, &id)).await
    }

    async fn bounded<T>(&self, operation: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.operation_timeout, operation)
            .await
            .map_err(|_| TrendingError::Timeout(self.operation_timeout))?
    }
}
