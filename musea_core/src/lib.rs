// src/lib.rs
pub mod adapters;
pub mod aggregator;
pub mod artwork;
pub mod composite_id;
pub mod detail;
pub mod error;
pub mod query;
pub mod settings;
pub mod throttle;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

pub use crate::aggregator::{AggregateSearchResult, Aggregator, SourceFailure};
pub use crate::artwork::{CanonicalArtwork, Source};
pub use crate::error::{ErrorKind, MuseumError};
pub use crate::query::{SearchQuery, SourceSelector, DEFAULT_LIMIT, MAX_LIMIT};
pub use crate::settings::{Settings, SettingsStore, SourceSettings};

/// One museum's collection API, behind the shape the aggregator needs.
///
/// Adapters are constructed explicitly and injected through the
/// [`AdapterRegistry`], so tests can stand in mock implementations and
/// each instance carries its own deadlines and pacing.
#[async_trait]
pub trait MuseumAdapter: Send + Sync {
    /// Which museum this adapter fronts.
    fn source(&self) -> Source;

    /// Returns a description of the adapter.
    fn description(&self) -> &'static str;

    /// Run a search and return normalized artworks in upstream order.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<CanonicalArtwork>, MuseumError>;

    /// Fetch and normalize a single artwork by its native identifier.
    async fn fetch_by_id(&self, native_id: &str) -> Result<CanonicalArtwork, MuseumError>;
}

/// Registry of constructed adapters, keyed by source.
pub struct AdapterRegistry {
    adapters: HashMap<Source, Arc<dyn MuseumAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        AdapterRegistry {
            adapters: HashMap::new(),
        }
    }

    pub fn register(&mut self, adapter: Arc<dyn MuseumAdapter>) {
        self.adapters.insert(adapter.source(), adapter);
    }

    pub fn get(&self, source: Source) -> Option<Arc<dyn MuseumAdapter>> {
        self.adapters.get(&source).map(Arc::clone)
    }

    /// Registered sources, in canonical order.
    pub fn sources(&self) -> Vec<Source> {
        Source::ALL
            .into_iter()
            .filter(|source| self.adapters.contains_key(source))
            .collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a registry with all three real museum adapters.
pub fn build_default_registry(settings: &Settings) -> Result<AdapterRegistry, MuseumError> {
    let mut registry = AdapterRegistry::new();

    registry.register(Arc::new(adapters::met::MetAdapter::new(&settings.met)?));
    registry.register(Arc::new(adapters::rijksmuseum::RijksAdapter::new(
        &settings.rijks,
    )?));
    registry.register(Arc::new(adapters::vanda::VaAdapter::new(&settings.va)?));

    Ok(registry)
}
