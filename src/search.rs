use crate::error::{Result, TrendingError};
use crate::github::GitHubClient;
use crate::models::SearchWindow;
use crate::types::{RepositorySummary, SearchResponse};
use tracing::{debug, info};

/// Repositories created inside `window`, most starred first.
pub async fn search_repositories(
    client: &GitHubClient,
    window: SearchWindow,
) -> Result<Vec<RepositorySummary>> {
    let query = window.query();
    debug!(%query, "Searching trending repositories");

    let url = client.endpoint("/search/repositories");
    let response: SearchResponse = client
        .get_json(&url, &[("q", query.as_str()), ("sort", "stars"), ("order", "desc")])
        .await
        .map_err(TrendingError::SearchFailed)?;

    info!(
        cutoff = %window.cutoff,
        returned = response.items.len(),
        total = ?response.total_count,
        "Trending search complete"
    );

    Ok(response.items)
}
