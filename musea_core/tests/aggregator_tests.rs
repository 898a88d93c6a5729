//! End-to-end aggregator behavior against mock adapters.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use musea_core::{
    AdapterRegistry, Aggregator, CanonicalArtwork, ErrorKind, MuseumAdapter, MuseumError,
    SearchQuery, Settings, Source, SourceSettings,
};

/// How a mock adapter responds to `search`.
enum Behavior {
    /// Return these artworks.
    Return(Vec<CanonicalArtwork>),
    /// Fail with this error kind.
    Fail(ErrorKind),
    /// Never come back; the aggregator's deadline has to fire.
    Hang,
}

struct MockAdapter {
    source: Source,
    behavior: Behavior,
    search_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockAdapter {
    fn new(source: Source, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            source,
            behavior,
            search_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        })
    }

    fn returning(source: Source, count: usize) -> Arc<Self> {
        Self::new(source, Behavior::Return(artworks(source, count)))
    }

    fn error_for(kind: ErrorKind) -> MuseumError {
        match kind {
            ErrorKind::Timeout => MuseumError::Timeout(1),
            ErrorKind::RateLimited => MuseumError::RateLimited {
                retry_after: Some(10),
            },
            ErrorKind::Upstream => MuseumError::Upstream("HTTP 502: Bad Gateway".into()),
            ErrorKind::NotFound => MuseumError::NotFound,
            ErrorKind::Malformed => MuseumError::Malformed("not JSON".into()),
            ErrorKind::InvalidIdentifier => MuseumError::InvalidIdentifier("x".into()),
        }
    }
}

#[async_trait]
impl MuseumAdapter for MockAdapter {
    fn source(&self) -> Source {
        self.source
    }

    fn description(&self) -> &'static str {
        "mock adapter"
    }

    async fn search(&self, _query: &SearchQuery) -> Result<Vec<CanonicalArtwork>, MuseumError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Return(artworks) => Ok(artworks.clone()),
            Behavior::Fail(kind) => Err(Self::error_for(*kind)),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Vec::new())
            }
        }
    }

    async fn fetch_by_id(&self, native_id: &str) -> Result<CanonicalArtwork, MuseumError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Return(artworks) => artworks
                .iter()
                .find(|art| art.id.ends_with(native_id))
                .cloned()
                .ok_or(MuseumError::NotFound),
            Behavior::Fail(kind) => Err(Self::error_for(*kind)),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Err(MuseumError::NotFound)
            }
        }
    }
}

fn artworks(source: Source, count: usize) -> Vec<CanonicalArtwork> {
    (0..count)
        .map(|i| CanonicalArtwork::new(source, &i.to_string(), format!("Artwork {}", i)))
        .collect()
}

/// Settings with deadlines short enough for hang tests to finish quickly.
fn fast_settings() -> Settings {
    let fast = SourceSettings {
        timeout_ms: 200,
        ..SourceSettings::default()
    };
    Settings {
        met: fast.clone(),
        rijks: fast.clone(),
        va: fast,
    }
}

fn registry_of(mocks: &[Arc<MockAdapter>]) -> AdapterRegistry {
    let mut registry = AdapterRegistry::new();
    for mock in mocks {
        registry.register(Arc::clone(mock) as Arc<dyn MuseumAdapter>);
    }
    registry
}

#[tokio::test]
async fn test_multi_source_merge_and_truncation() {
    // Met returns 15, V&A returns 10, no overlap; limit 20.
    let met = MockAdapter::returning(Source::Met, 15);
    let va = MockAdapter::returning(Source::Va, 10);
    let registry = registry_of(&[Arc::clone(&met), Arc::clone(&va)]);

    let aggregator = Aggregator::with_settings(&registry, fast_settings());
    let query = SearchQuery::new("monet").with_limit(20);
    let result = aggregator.search(&query).await.unwrap();

    assert_eq!(result.artworks.len(), 20);
    assert!(!result.partial);
    assert!(result.errors.is_empty());
    assert_eq!(result.completed.len(), 2);
    assert!(result.duration_ms.is_some());

    // Every artwork came from one of the two mocks, no duplicates.
    let mut ids: Vec<&str> = result.artworks.iter().map(|a| a.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[tokio::test]
async fn test_single_source_timeout_is_surfaced() {
    let met = MockAdapter::new(Source::Met, Behavior::Hang);
    let registry = registry_of(&[met]);

    let aggregator = Aggregator::with_settings(&registry, fast_settings());
    let query = SearchQuery::new("x").with_source(Source::Met).with_limit(20);
    let err = aggregator.search(&query).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_partial_failure_keeps_other_sources() {
    let met = MockAdapter::returning(Source::Met, 5);
    let va = MockAdapter::returning(Source::Va, 5);
    let rijks = MockAdapter::new(Source::Rijks, Behavior::Hang);
    let registry = registry_of(&[met, va, rijks]);

    let aggregator = Aggregator::with_settings(&registry, fast_settings());
    let result = aggregator.search(&SearchQuery::new("monet")).await.unwrap();

    assert_eq!(result.artworks.len(), 10);
    assert!(result.partial);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[&Source::Rijks].kind, ErrorKind::Timeout);
    assert_eq!(result.completed.len(), 2);
}

#[tokio::test]
async fn test_all_failed_escalates_instead_of_empty_success() {
    let met = MockAdapter::new(Source::Met, Behavior::Fail(ErrorKind::Upstream));
    let va = MockAdapter::new(Source::Va, Behavior::Fail(ErrorKind::RateLimited));
    let rijks = MockAdapter::new(Source::Rijks, Behavior::Hang);
    let registry = registry_of(&[met, va, rijks]);

    let aggregator = Aggregator::with_settings(&registry, fast_settings());
    let err = aggregator.search(&SearchQuery::new("x")).await.unwrap_err();

    // Timeout dominates the rate limit and the upstream failure.
    assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_all_failed_rate_limit_dominates_upstream() {
    let met = MockAdapter::new(Source::Met, Behavior::Fail(ErrorKind::Upstream));
    let va = MockAdapter::new(Source::Va, Behavior::Fail(ErrorKind::RateLimited));
    let registry = registry_of(&[met, va]);

    let aggregator = Aggregator::with_settings(&registry, fast_settings());
    let err = aggregator.search(&SearchQuery::new("x")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RateLimited);
    assert_eq!(err.retry_after(), Some(10));
}

#[tokio::test]
async fn test_duplicate_ids_first_occurrence_wins() {
    let mut records = artworks(Source::Met, 3);
    let mut dup = records[0].clone();
    dup.artist = "Changed".to_string();
    records.push(dup);

    let met = MockAdapter::new(Source::Met, Behavior::Return(records));
    let registry = registry_of(&[met]);

    let aggregator = Aggregator::with_settings(&registry, fast_settings());
    let query = SearchQuery::new("x").with_source(Source::Met);
    let result = aggregator.search(&query).await.unwrap();

    assert_eq!(result.artworks.len(), 3);
    let first = result.artworks.iter().find(|a| a.id == "met:0").unwrap();
    assert_ne!(first.artist, "Changed");
}

#[tokio::test]
async fn test_limit_enforced_for_every_request() {
    let met = MockAdapter::returning(Source::Met, 50);
    let va = MockAdapter::returning(Source::Va, 50);
    let registry = registry_of(&[met, va]);
    let aggregator = Aggregator::with_settings(&registry, fast_settings());

    for limit in [1u32, 5, 20, 99] {
        let result = aggregator
            .search(&SearchQuery::new("x").with_limit(limit))
            .await
            .unwrap();
        assert!(result.artworks.len() <= limit as usize);
    }
}

#[tokio::test]
async fn test_single_source_preserves_upstream_order() {
    let met = MockAdapter::returning(Source::Met, 10);
    let registry = registry_of(&[met]);

    let aggregator = Aggregator::with_settings(&registry, fast_settings());
    let query = SearchQuery::new("x").with_source(Source::Met);
    let result = aggregator.search(&query).await.unwrap();

    let ids: Vec<String> = result.artworks.iter().map(|a| a.id.clone()).collect();
    let expected: Vec<String> = (0..10).map(|i| format!("met:{}", i)).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_get_by_composite_id_routes_to_adapter() {
    let met = MockAdapter::new(
        Source::Met,
        Behavior::Return(vec![CanonicalArtwork::new(
            Source::Met,
            "436532",
            "Wheat Field with Cypresses",
        )]),
    );
    let registry = registry_of(&[Arc::clone(&met)]);

    let aggregator = Aggregator::with_settings(&registry, fast_settings());
    let art = aggregator.get_by_composite_id("met:436532").await.unwrap();

    assert_eq!(art.id, "met:436532");
    assert_eq!(art.source, Source::Met);
    assert_eq!(met.fetch_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_get_by_composite_id_invalid_fails_before_network() {
    let met = MockAdapter::returning(Source::Met, 1);
    let registry = registry_of(&[Arc::clone(&met)]);
    let aggregator = Aggregator::with_settings(&registry, fast_settings());

    for bad in ["met", "met:", "louvre:1", ""] {
        let err = aggregator.get_by_composite_id(bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidIdentifier, "id: {:?}", bad);
    }

    assert_eq!(met.fetch_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_get_by_composite_id_unregistered_source() {
    let met = MockAdapter::returning(Source::Met, 1);
    let registry = registry_of(&[met]);
    let aggregator = Aggregator::with_settings(&registry, fast_settings());

    let err = aggregator.get_by_composite_id("va:O18899").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidIdentifier);
}

#[tokio::test]
async fn test_get_by_composite_id_not_found_is_distinct() {
    let met = MockAdapter::returning(Source::Met, 1);
    let registry = registry_of(&[met]);
    let aggregator = Aggregator::with_settings(&registry, fast_settings());

    let err = aggregator.get_by_composite_id("met:99999").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_failed_source_does_not_cancel_siblings() {
    let met = MockAdapter::new(Source::Met, Behavior::Fail(ErrorKind::Upstream));
    let va = MockAdapter::returning(Source::Va, 3);
    let registry = registry_of(&[Arc::clone(&met), Arc::clone(&va)]);

    let aggregator = Aggregator::with_settings(&registry, fast_settings());
    let result = aggregator.search(&SearchQuery::new("x")).await.unwrap();

    assert_eq!(va.search_calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.artworks.len(), 3);
    assert_eq!(result.errors[&Source::Met].kind, ErrorKind::Upstream);
}
