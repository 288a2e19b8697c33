use crate::error::{Result, TrendingError};
use crate::github::GitHubClient;
use crate::join::join_all;
use crate::models::{DependentPayload, DependentResource, RepositoryDetail, RepositoryId};
use crate::types::Repository;
use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{debug, info};

/// Fetch the primary record for `id`, then every dependent resource
/// concurrently, and merge them into one composite.
///
/// A primary failure returns before any dependent request is sent. A
/// dependent failure fails the whole call; no partial composite escapes.
pub async fn fetch_repository_detail(
    client: &GitHubClient,
    id: &RepositoryId,
) -> Result<RepositoryDetail> {
    let primary_failed = |source| TrendingError::DetailPrimaryFailed {
        repo: id.to_string(),
        source,
    };
    let primary_url = client.repo_url(id).map_err(primary_failed)?;
    let detail: Repository = client
        .get_json(primary_url.as_str(), &[])
        .await
        .map_err(primary_failed)?;

    debug!(repo = %id, canonical_url = %detail.url, "Primary record fetched, fanning out");

    let branches = DependentResource::ALL
        .into_iter()
        .map(|resource| fetch_dependent(client, &detail, resource));
    let payloads = join_all(branches).await?;

    let composite = RepositoryDetail::compose(detail, payloads)?;

    info!(
        repo = %id,
        events = composite.events.len(),
        contributors = composite.contributors.len(),
        issues = composite.issues.len(),
        labels = composite.labels.len(),
        commits = composite.commits.len(),
        "Repository detail composed"
    );

    Ok(composite)
}

fn fetch_dependent<'a>(
    client: &'a GitHubClient,
    detail: &Repository,
    resource: DependentResource,
) -> BoxFuture<'a, Result<DependentPayload>> {
    let url = resource.url_for(detail);

    async move {
        let fail = |source| TrendingError::DetailDependentFailed { resource, source };
        let payload = match resource {
            DependentResource::Events => {
                DependentPayload::Events(client.get_json(&url, &[]).await.map_err(fail)?)
            }
            DependentResource::Contributors => {
                DependentPayload::Contributors(client.get_json(&url, &[]).await.map_err(fail)?)
            }
            DependentResource::Issues => {
                DependentPayload::Issues(client.get_json(&url, &[]).await.map_err(fail)?)
            }
            DependentResource::Labels => {
                DependentPayload::Labels(client.get_json(&url, &[]).await.map_err(fail)?)
            }
            DependentResource::Commits => {
                DependentPayload::Commits(client.get_json(&url, &[]).await.map_err(fail)?)
            }
        };
        debug!(%resource, "Dependent resource fetched");
        Ok(payload)
    }
    .boxed()
}
