use crate::error::{Result, TrendingError, UpstreamError};
use crate::models::{RateLimitState, RepositoryId};
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
const TOKEN_PARAM: &str = "access_token";
const LOW_RATE_LIMIT: u32 = 10;

/// Connection settings for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    pub user_agent: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            token: String::new(),
            user_agent: format!("trending-repos/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Read-only GitHub REST client. Every request carries the access token as
/// a query parameter.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TrendingError::EnvError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(GitHubClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/search/repositories`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Parse `url`, then append `params` and the access token.
    pub fn authorized_url(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<Url, UpstreamError> {
        let mut url = Url::parse(url)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair(TOKEN_PARAM, &self.token);
        }
        Ok(url)
    }

    /// `{base}/repos/{owner}/{name}` with each identifier segment
    /// percent-encoded. Dot segments are dropped so the path stays under
    /// `/repos`.
    pub fn repo_url(&self, id: &RepositoryId) -> std::result::Result<Url, UpstreamError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push("repos")
            .extend(
                id.as_str()
                    .split('/')
                    .filter(|segment| !matches!(*segment, "." | "..")),
            );
        Ok(url)
    }

    async fn make_request(&self, url: Url) -> std::result::Result<Response, UpstreamError> {
        debug!(path = url.path(), "GitHub request");

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(network_error)?;

        let rate_limit = rate_limit_state(response.headers());
        let display_url = redacted(&url);

        match response.status() {
            status if status.is_success() => {
                if rate_limit.remaining < LOW_RATE_LIMIT {
                    warn!(
                        remaining = rate_limit.remaining,
                        reset = %rate_limit.reset_time,
                        "GitHub rate limit running low"
                    );
                }
                Ok(response)
            }
            reqwest::StatusCode::NOT_FOUND => Err(UpstreamError::NotFound(display_url)),
            reqwest::StatusCode::FORBIDDEN | reqwest::StatusCode::TOO_MANY_REQUESTS
                if rate_limit.is_limited =>
            {
                Err(UpstreamError::RateLimitExceeded(format!(
                    "API rate limit exceeded. Reset at: {}",
                    rate_limit.reset_time
                )))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(UpstreamError::Status {
                    url: display_url,
                    status,
                    body,
                })
            }
        }
    }

    /// GET `url` (token appended) and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<T, UpstreamError> {
        let url = self.authorized_url(url, params)?;
        let response = self.make_request(url).await?;
        let bytes = response.bytes().await.map_err(network_error)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Rate limit budget from GitHub's response headers
pub fn rate_limit_state(headers: &HeaderMap) -> RateLimitState {
    let header_value = |name: &str| headers.get(name).and_then(|h| h.to_str().ok());

    let remaining = header_value("X-RateLimit-Remaining").and_then(|s| s.parse::<u32>().ok());

    let limit = header_value("X-RateLimit-Limit")
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(5000);

    let reset_time = header_value("X-RateLimit-Reset")
        .and_then(|s| s.parse::<i64>().ok())
        .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0))
        .unwrap_or_else(|| Utc::now() + chrono::Duration::hours(1));

    RateLimitState {
        // Missing headers (mocks, enterprise proxies) are not an exhausted budget
        remaining: remaining.unwrap_or(limit),
        limit,
        reset_time,
        is_limited: remaining == Some(0),
    }
}

// reqwest errors print their request URL, which carries the token.
fn network_error(e: reqwest::Error) -> UpstreamError {
    UpstreamError::NetworkError(e.without_url())
}

// Keeps the token out of error messages and logs.
fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != TOKEN_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
    url.to_string()
}
