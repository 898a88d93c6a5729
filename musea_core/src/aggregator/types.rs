//! Result types for multi-source searches.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::artwork::{CanonicalArtwork, Source};
use crate::error::{ErrorKind, MuseumError};

/// What one source's failure looked like, kept so partial results can still
/// explain themselves to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFailure {
    pub kind: ErrorKind,

    /// Human-readable message
    pub error: String,

    /// Seconds until a retry is acceptable, for rate-limit failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl SourceFailure {
    pub fn from_error(error: &MuseumError) -> Self {
        Self {
            kind: error.kind(),
            error: error.to_string(),
            retry_after: error.retry_after(),
        }
    }
}

/// Complete results from a multi-source search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateSearchResult {
    /// Merged, deduplicated, bounded artworks.
    pub artworks: Vec<CanonicalArtwork>,

    /// Sources that completed successfully.
    pub completed: Vec<Source>,

    /// Sources that failed (partial results).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub errors: HashMap<Source, SourceFailure>,

    /// Whether results are partial (some sources failed/timed out).
    #[serde(default)]
    pub partial: bool,

    /// Total time taken (ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl AggregateSearchResult {
    pub fn new() -> Self {
        Self {
            artworks: Vec::new(),
            completed: Vec::new(),
            errors: HashMap::new(),
            partial: false,
            duration_ms: None,
        }
    }

    /// Add one source's successful results.
    pub fn add_source(&mut self, source: Source, artworks: Vec<CanonicalArtwork>) {
        self.completed.push(source);
        self.artworks.extend(artworks);
    }

    /// Add a failed source.
    pub fn add_error(&mut self, source: Source, error: &MuseumError) {
        self.errors.insert(source, SourceFailure::from_error(error));
        self.partial = true;
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if all sources failed (no results).
    pub fn all_failed(&self) -> bool {
        self.completed.is_empty() && !self.errors.is_empty()
    }

    /// Dedup by composite ID (first occurrence wins), shuffle when more
    /// than one source was queried, and truncate to the limit.
    pub(crate) fn finalize(&mut self, limit: usize, multi_source: bool) {
        let mut seen = HashSet::new();
        self.artworks.retain(|art| seen.insert(art.id.clone()));

        if multi_source {
            use rand::seq::SliceRandom;
            let mut rng = rand::rng();
            self.artworks.shuffle(&mut rng);
        }

        self.artworks.truncate(limit);
    }
}

impl Default for AggregateSearchResult {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn art(source: Source, native_id: &str) -> CanonicalArtwork {
        CanonicalArtwork::new(source, native_id, native_id)
    }

    #[test]
    fn test_add_source_and_error() {
        let mut result = AggregateSearchResult::new();
        result.add_source(Source::Met, vec![art(Source::Met, "1"), art(Source::Met, "2")]);
        result.add_error(Source::Rijks, &MuseumError::Timeout(40_000));

        assert_eq!(result.artworks.len(), 2);
        assert_eq!(result.completed, vec![Source::Met]);
        assert!(result.partial);
        assert!(result.has_errors());
        assert!(!result.all_failed());
        assert_eq!(result.errors[&Source::Rijks].kind, ErrorKind::Timeout);
    }

    #[test]
    fn test_all_failed() {
        let mut result = AggregateSearchResult::new();
        result.add_error(Source::Met, &MuseumError::NotFound);
        assert!(result.all_failed());

        let empty = AggregateSearchResult::new();
        assert!(!empty.all_failed());
    }

    #[test]
    fn test_finalize_dedups_first_wins() {
        let mut result = AggregateSearchResult::new();
        let mut first = art(Source::Met, "1");
        first.artist = "First".to_string();
        let mut dup = art(Source::Met, "1");
        dup.artist = "Second".to_string();

        result.add_source(Source::Met, vec![first, art(Source::Met, "2"), dup]);
        result.finalize(10, false);

        assert_eq!(result.artworks.len(), 2);
        assert_eq!(result.artworks[0].artist, "First");
    }

    #[test]
    fn test_finalize_truncates() {
        let mut result = AggregateSearchResult::new();
        result.add_source(
            Source::Met,
            (0..30).map(|i| art(Source::Met, &i.to_string())).collect(),
        );
        result.finalize(20, false);
        assert_eq!(result.artworks.len(), 20);
    }

    #[test]
    fn test_finalize_single_source_keeps_order() {
        let mut result = AggregateSearchResult::new();
        result.add_source(
            Source::Met,
            (0..10).map(|i| art(Source::Met, &i.to_string())).collect(),
        );
        result.finalize(10, false);

        let ids: Vec<&str> = result.artworks.iter().map(|a| a.id.as_str()).collect();
        let expected: Vec<String> = (0..10).map(|i| format!("met:{}", i)).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_finalize_multi_source_preserves_set() {
        let mut result = AggregateSearchResult::new();
        result.add_source(
            Source::Met,
            (0..10).map(|i| art(Source::Met, &i.to_string())).collect(),
        );
        result.add_source(
            Source::Va,
            (0..10).map(|i| art(Source::Va, &i.to_string())).collect(),
        );
        result.finalize(100, true);

        assert_eq!(result.artworks.len(), 20);
        let mut ids: Vec<String> = result.artworks.iter().map(|a| a.id.clone()).collect();
        ids.sort();
        let mut expected: Vec<String> = (0..10)
            .flat_map(|i| [format!("met:{}", i), format!("va:{}", i)])
            .collect();
        expected.sort();
        assert_eq!(ids, expected);
    }
}
