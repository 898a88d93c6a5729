//! Aggregation engine.
//!
//! Fans a query out to the selected adapters in parallel, each under its
//! own deadline, and consolidates whatever comes back. One slow or broken
//! museum never takes the others down with it.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::artwork::{CanonicalArtwork, Source};
use crate::composite_id;
use crate::error::MuseumError;
use crate::query::{SearchQuery, SourceSelector};
use crate::settings::Settings;
use crate::{AdapterRegistry, MuseumAdapter};

use super::types::AggregateSearchResult;

/// Engine for executing searches across multiple museum adapters.
pub struct Aggregator<'a> {
    registry: &'a AdapterRegistry,
    settings: Settings,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator with the built-in per-source deadlines.
    pub fn new(registry: &'a AdapterRegistry) -> Self {
        Self::with_settings(registry, Settings::builtin().clone())
    }

    /// Create an aggregator with custom per-source settings.
    pub fn with_settings(registry: &'a AdapterRegistry, settings: Settings) -> Self {
        Self { registry, settings }
    }

    /// Execute a search against the query's selected sources.
    ///
    /// Per-source failures are folded into the result's `errors` map; the
    /// call itself only fails when every requested source failed, with the
    /// dominant failure (`Timeout > RateLimited > Upstream`) as the error.
    pub async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<AggregateSearchResult, MuseumError> {
        let start = Instant::now();
        let adapters = self.select_adapters(query.source)?;
        let multi_source = adapters.len() > 1;

        let futures: Vec<_> = adapters
            .iter()
            .map(|adapter| {
                let adapter = Arc::clone(adapter);
                let source = adapter.source();
                let timeout_ms = self.settings.for_source(source).timeout_ms;

                async move {
                    let source_start = Instant::now();
                    match timeout(Duration::from_millis(timeout_ms), adapter.search(query)).await
                    {
                        Ok(Ok(artworks)) => {
                            debug!(
                                source = %source,
                                count = artworks.len(),
                                duration_ms = source_start.elapsed().as_millis() as u64,
                                "Source search completed"
                            );
                            Ok((source, artworks))
                        }
                        Ok(Err(e)) => Err((source, e)),
                        // The deadline drops the future: in-flight detail
                        // fetches are cancelled, partial results discarded.
                        Err(_) => Err((source, MuseumError::Timeout(timeout_ms))),
                    }
                }
            })
            .collect();

        let outcomes = futures::future::join_all(futures).await;

        let mut result = AggregateSearchResult::new();
        let mut failures: Vec<MuseumError> = Vec::new();

        for outcome in outcomes {
            match outcome {
                Ok((source, artworks)) => result.add_source(source, artworks),
                Err((source, error)) => {
                    warn!(source = %source, error = %error, "Source search failed");
                    result.add_error(source, &error);
                    failures.push(error);
                }
            }
        }

        if result.all_failed() {
            return Err(dominant_failure(failures));
        }

        result.finalize(query.effective_limit(), multi_source);
        result.duration_ms = Some(start.elapsed().as_millis() as u64);
        Ok(result)
    }

    /// Fetch a single artwork by its composite identifier.
    ///
    /// A structurally invalid identifier fails before any network call.
    pub async fn get_by_composite_id(&self, id: &str) -> Result<CanonicalArtwork, MuseumError> {
        let (source, native_id) = composite_id::decode(id)?;

        let adapter = self
            .registry
            .get(source)
            .ok_or_else(|| MuseumError::InvalidIdentifier(id.to_string()))?;

        adapter.fetch_by_id(native_id).await
    }

    fn select_adapters(
        &self,
        selector: SourceSelector,
    ) -> Result<Vec<Arc<dyn MuseumAdapter>>, MuseumError> {
        let adapters = match selector {
            SourceSelector::All => Source::ALL
                .iter()
                .filter_map(|source| self.registry.get(*source))
                .collect::<Vec<_>>(),
            SourceSelector::One(source) => {
                let adapter = self.registry.get(source).ok_or_else(|| {
                    MuseumError::Upstream(format!("source {} is not registered", source))
                })?;
                vec![adapter]
            }
        };

        if adapters.is_empty() {
            return Err(MuseumError::Upstream("no adapters registered".to_string()));
        }

        Ok(adapters)
    }
}

/// Pick the error that best describes an all-failed search.
fn dominant_failure(mut failures: Vec<MuseumError>) -> MuseumError {
    failures.sort_by_key(|e| std::cmp::Reverse(e.kind().dominance()));
    failures
        .into_iter()
        .next()
        .unwrap_or_else(|| MuseumError::Upstream("no adapters registered".to_string()))
}
