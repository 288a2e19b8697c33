//! All-or-nothing join over concurrently polled branches.

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;

/// Poll every branch concurrently on the current task and wait for all of
/// them.
///
/// Returns the outputs in the order the branches were given, regardless of
/// completion order. The first branch to fail ends the join with its error;
/// the remaining branches are dropped and their results never observed.
pub async fn join_all<I, F, T, E>(branches: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    let mut pending: FuturesUnordered<_> = branches
        .into_iter()
        .enumerate()
        .map(|(index, branch)| async move { (index, branch.await) })
        .collect();

    let mut settled = Vec::with_capacity(pending.len());
    while let Some((index, outcome)) = pending.next().await {
        settled.push((index, outcome?));
    }

    settled.sort_by_key(|(index, _)| *index);
    Ok(settled.into_iter().map(|(_, value)| value).collect())
}
