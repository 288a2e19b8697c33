use crate::models::DependentResource;
use std::time::Duration;
use thiserror::Error;

/// Failure talking to the upstream GitHub API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Built through `without_url`, so the token-bearing URL never reaches
    /// the message.
    #[error("Network error: {0}")]
    NetworkError(reqwest::Error),

    #[error("API request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum TrendingError {
    #[error("Repository search failed: {0}")]
    SearchFailed(#[source] UpstreamError),

    #[error("Fetching repository {repo} failed: {source}")]
    DetailPrimaryFailed {
        repo: String,
        #[source]
        source: UpstreamError,
    },

    #[error("Fetching {resource} failed: {source}")]
    DetailDependentFailed {
        resource: DependentResource,
        #[source]
        source: UpstreamError,
    },

    #[error("Composite is missing {0}")]
    MissingDependent(DependentResource),

    #[error("Invalid repository identifier: {0:?}")]
    InvalidRepoId(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Environment error: {0}")]
    EnvError(String),
}

impl TrendingError {
    /// The upstream cause, if this failure came from the GitHub API.
    pub fn upstream(&self) -> Option<&UpstreamError> {
        match self {
            TrendingError::SearchFailed(source)
            | TrendingError::DetailPrimaryFailed { source, .. }
            | TrendingError::DetailDependentFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TrendingError>;
