//! Bounded-concurrency detail fetching.
//!
//! Search endpoints hand back native IDs; turning those into full records
//! means one request per ID. This runs a fixed-size pool over the batch:
//! wide enough to meet latency budgets, narrow enough to stay polite to
//! courtesy-sensitive upstreams.

use futures::stream::{self, StreamExt};
use std::future::Future;
use tracing::debug;

use crate::error::MuseumError;

/// Fetch details for `items` with at most `concurrency` requests in flight.
///
/// Results come back in input order. A failed item is logged and skipped;
/// one bad record never fails the batch.
pub async fn fetch_bounded<I, T, F, Fut>(
    items: Vec<I>,
    concurrency: usize,
    fetch: F,
) -> Vec<T>
where
    I: std::fmt::Display,
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<T, MuseumError>>,
{
    let concurrency = concurrency.max(1);

    let mut results: Vec<(usize, T)> = stream::iter(items.into_iter().enumerate())
        .map(|(idx, item)| {
            let label = item.to_string();
            let fut = fetch(item);
            async move {
                match fut.await {
                    Ok(value) => Some((idx, value)),
                    Err(e) => {
                        debug!(item = %label, error = %e, "Skipping failed detail fetch");
                        None
                    }
                }
            }
        })
        .buffer_unordered(concurrency)
        .filter_map(|r| async move { r })
        .collect()
        .await;

    // buffer_unordered yields in completion order; restore the upstream's.
    results.sort_by_key(|(idx, _)| *idx);
    results.into_iter().map(|(_, value)| value).collect()
}
