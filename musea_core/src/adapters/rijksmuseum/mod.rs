//! Rijksmuseum adapter.
//!
//! The museum exposes two generations of API and this adapter needs both:
//! the Linked-Art endpoints (fielded search over item URIs, JSON-LD object
//! records) for metadata, and the legacy collection API for image URLs,
//! which the Linked-Art records do not resolve. Every artwork therefore
//! costs two calls; the source's larger deadline accounts for that.

use async_trait::async_trait;
use chrono::{DateTime, Datelike};
use reqwest::Client;
use tracing::debug;
use url::Url;

mod cascade;
mod types;

pub use types::{
    LinkedArtConcept, LinkedArtDigitalObject, LinkedArtName, LinkedArtObject, LinkedArtProduction,
    LinkedArtRef, LinkedArtStatement, LinkedArtSubject, LinkedArtTimespan, RijksLegacyArtObject,
    RijksLegacyResponse, RijksSearchItem, RijksSearchPage, RijksWebImage,
};

use crate::adapters::{build_client, check_status};
use crate::artwork::{CanonicalArtwork, Source};
use crate::detail::fetch_bounded;
use crate::error::MuseumError;
use crate::query::SearchQuery;
use crate::settings::SourceSettings;
use crate::throttle::RequestGate;
use crate::MuseumAdapter;

use cascade::CascadeStep;

const DEFAULT_SEARCH_BASE_URL: &str = "https://data.rijksmuseum.nl/search/collection";
const DEFAULT_LEGACY_BASE_URL: &str = "https://www.rijksmuseum.nl/api/en/collection";
const COLLECTION_PAGE_BASE: &str = "https://www.rijksmuseum.nl/en/collection";

/// AAT classification: a work's preferred name.
const AAT_PREFERRED_NAME: &str = "http://vocab.getty.edu/aat/300404670";

/// AAT classification: the museum's own object number.
const AAT_OBJECT_NUMBER: &str = "http://vocab.getty.edu/aat/300312355";

pub struct RijksAdapter {
    client: Client,
    search_base_url: String,
    legacy_base_url: String,
    api_key: Option<String>,
    detail_concurrency: usize,
    gate: RequestGate,
}

impl RijksAdapter {
    pub fn new(settings: &SourceSettings) -> Result<Self, MuseumError> {
        Ok(Self {
            client: build_client(settings.timeout_ms)?,
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            legacy_base_url: DEFAULT_LEGACY_BASE_URL.to_string(),
            api_key: settings.api_key.clone(),
            detail_concurrency: settings.detail_concurrency,
            gate: RequestGate::from_millis(settings.min_request_interval_ms),
        })
    }

    /// Create an adapter for testing with custom base URLs.
    #[cfg(test)]
    pub fn with_base_urls(search: impl Into<String>, legacy: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            search_base_url: search.into(),
            legacy_base_url: legacy.into(),
            api_key: Some("test-key".to_string()),
            detail_concurrency: 5,
            gate: RequestGate::from_millis(0),
        }
    }

    // Helper method to run one fielded search and collect item URIs
    async fn search_step(
        &self,
        step: CascadeStep,
        query: &SearchQuery,
    ) -> Result<Vec<String>, MuseumError> {
        let mut url = Url::parse(&self.search_base_url)
            .map_err(|e| MuseumError::Upstream(format!("Failed to parse URL: {}", e)))?;

        {
            let mut pairs = url.query_pairs_mut();
            match step {
                CascadeStep::Fielded {
                    creator,
                    object_type,
                } => {
                    if let Some(creator) = creator {
                        pairs.append_pair("creator", &creator);
                    }
                    if let Some(object_type) = object_type {
                        pairs.append_pair("type", &object_type);
                    }
                }
                CascadeStep::Title(q) => {
                    pairs.append_pair("title", &q);
                }
                CascadeStep::Creator(q) => {
                    pairs.append_pair("creator", &q);
                }
                CascadeStep::Description(q) => {
                    pairs.append_pair("description", &q);
                }
                CascadeStep::FallbackType => {
                    pairs.append_pair("type", cascade::FALLBACK_TYPE);
                }
            }
            if query.has_images {
                pairs.append_pair("imageAvailable", "true");
            }
        }

        self.gate.wait().await;
        let response = check_status(self.client.get(url).send().await?)?;
        let page: RijksSearchPage = response.json().await?;

        Ok(page
            .ordered_items
            .into_iter()
            .filter_map(|item| item.id)
            .collect())
    }

    // Helper method to resolve one item URI into its Linked-Art record
    async fn resolve_object(&self, uri: &str) -> Result<LinkedArtObject, MuseumError> {
        let url = Url::parse(uri)
            .map_err(|_| MuseumError::InvalidIdentifier(format!("rijks:{}", uri)))?;

        let response = check_status(
            self.client
                .get(url)
                .header(reqwest::header::ACCEPT, "application/ld+json")
                .send()
                .await?,
        )?;
        Ok(response.json().await?)
    }

    // Helper method to look up image URLs on the legacy API
    async fn resolve_images(
        &self,
        object_number: &str,
    ) -> Result<Option<(String, String)>, MuseumError> {
        let key = match &self.api_key {
            Some(key) => key,
            // No key configured: degrade to imageless records.
            None => return Ok(None),
        };

        let mut url = Url::parse(&format!(
            "{}/{}",
            self.legacy_base_url,
            urlencoding::encode(object_number)
        ))
        .map_err(|e| MuseumError::Upstream(format!("Failed to parse URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("key", key)
            .append_pair("format", "json");

        self.gate.wait().await;
        let response = check_status(self.client.get(url).send().await?)?;
        let parsed: RijksLegacyResponse = response.json().await?;

        Ok(parsed
            .art_object
            .and_then(|obj| obj.web_image)
            .and_then(|img| img.url)
            .filter(|u| !u.is_empty())
            .map(|u| {
                let small = small_image_variant(&u);
                (u, small)
            }))
    }

    /// Convert a Linked-Art record into the canonical model.
    ///
    /// `native_uri` is the item URI the record was resolved from; it is the
    /// stable native identifier even when the payload omits its own `id`.
    fn standardize(&self, native_uri: &str, raw: LinkedArtObject) -> CanonicalArtwork {
        let title = preferred_title(&raw)
            .or(raw.label.clone())
            .unwrap_or_default();

        let artist = raw
            .produced_by
            .as_ref()
            .map(|p| production_statement(p))
            .unwrap_or_default();

        let date = raw
            .produced_by
            .as_ref()
            .and_then(|p| p.timespan.as_ref())
            .and_then(timespan_display);

        let medium = raw
            .produced_by
            .as_ref()
            .map(|p| p.technique.as_slice())
            .unwrap_or_default()
            .iter()
            .chain(raw.made_of.iter())
            .filter_map(|c| c.label.clone())
            .collect::<Vec<_>>()
            .join(", ");

        let tags = raw
            .classified_as
            .iter()
            .filter_map(|c| c.label.clone())
            .collect();

        let object_number = extract_object_number(&raw);

        let museum_url = web_page(&raw).or_else(|| {
            object_number
                .as_ref()
                .map(|n| format!("{}/{}", COLLECTION_PAGE_BASE, n))
        });

        let mut artwork = CanonicalArtwork::new(Source::Rijks, native_uri, title)
            .with_artist(artist)
            .with_medium(medium)
            .with_museum_url(museum_url.unwrap_or_default())
            .with_tags(tags);

        artwork.date = date;
        artwork.object_number = object_number;
        artwork
    }

    // Resolve one URI end to end: metadata, then images off the legacy API.
    async fn fetch_full(&self, uri: &str) -> Result<CanonicalArtwork, MuseumError> {
        self.gate.wait().await;
        let raw = self.resolve_object(uri).await?;
        let mut artwork = self.standardize(uri, raw);

        if let Some(object_number) = artwork.object_number.clone() {
            match self.resolve_images(&object_number).await {
                Ok(Some((image_url, small_image_url))) => {
                    artwork.image_url = Some(image_url);
                    artwork.small_image_url = Some(small_image_url);
                }
                Ok(None) => {}
                Err(e) => {
                    // Image lookup is best effort; metadata alone is a result.
                    debug!(object_number = %object_number, error = %e, "Legacy image lookup failed");
                }
            }
        }

        Ok(artwork)
    }
}

#[async_trait]
impl MuseumAdapter for RijksAdapter {
    fn source(&self) -> Source {
        Source::Rijks
    }

    fn description(&self) -> &'static str {
        "The Rijksmuseum Linked-Art and legacy collection APIs"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<CanonicalArtwork>, MuseumError> {
        let plan = cascade::build_plan(query);
        let mut uris = cascade::run(plan, |step| self.search_step(step, query)).await?;

        let limit = query.effective_limit();
        uris.truncate(limit);

        debug!(count = uris.len(), "Resolving Rijksmuseum object records");

        let mut artworks = fetch_bounded(uris, self.detail_concurrency, |uri| async move {
            self.fetch_full(&uri).await
        })
        .await;

        // imageAvailable narrows the search, but a record can still come
        // back imageless when the legacy lookup has nothing for it.
        if query.has_images {
            artworks.retain(|art| art.has_image());
        }

        Ok(artworks)
    }

    async fn fetch_by_id(&self, native_id: &str) -> Result<CanonicalArtwork, MuseumError> {
        if !native_id.starts_with("http://") && !native_id.starts_with("https://") {
            return Err(MuseumError::InvalidIdentifier(format!(
                "rijks:{}",
                native_id
            )));
        }
        self.fetch_full(native_id).await
    }
}

fn preferred_title(raw: &LinkedArtObject) -> Option<String> {
    raw.identified_by
        .iter()
        .filter(|n| n.kind.as_deref() == Some("Name"))
        .find(|n| {
            n.classified_as
                .iter()
                .any(|c| c.id.as_deref() == Some(AAT_PREFERRED_NAME))
        })
        .and_then(|n| n.content.clone())
        .filter(|t| !t.is_empty())
}

fn extract_object_number(raw: &LinkedArtObject) -> Option<String> {
    let mut identifiers = raw
        .identified_by
        .iter()
        .filter(|n| n.kind.as_deref() == Some("Identifier"));

    let classified = identifiers.clone().find(|n| {
        n.classified_as
            .iter()
            .any(|c| c.id.as_deref() == Some(AAT_OBJECT_NUMBER))
    });

    classified
        .or_else(|| identifiers.next())
        .and_then(|n| n.content.clone())
        .filter(|n| !n.is_empty())
}

fn production_statement(production: &LinkedArtProduction) -> String {
    production
        .referred_to_by
        .iter()
        .filter_map(|s| s.content.as_deref())
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default()
        .to_string()
}

fn web_page(raw: &LinkedArtObject) -> Option<String> {
    raw.subject_of
        .iter()
        .flat_map(|s| s.digitally_carried_by.iter())
        .flat_map(|d| d.access_point.iter())
        .find_map(|r| r.id.clone())
        .filter(|u| !u.is_empty())
}

/// Year (or year range) from a Linked-Art timespan.
fn timespan_display(timespan: &LinkedArtTimespan) -> Option<String> {
    let begin = timespan.begin_of_the_begin.as_deref().and_then(year_of);
    let end = timespan.end_of_the_end.as_deref().and_then(year_of);

    match (begin, end) {
        (Some(b), Some(e)) if b == e => Some(b.to_string()),
        (Some(b), Some(e)) => Some(format!("{} - {}", b, e)),
        (Some(b), None) => Some(b.to_string()),
        (None, Some(e)) => Some(e.to_string()),
        (None, None) => None,
    }
}

fn year_of(s: &str) -> Option<i32> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.year());
    }
    // Not a full timestamp; settle for a leading year.
    s.get(..4)?.parse().ok()
}

/// The legacy API serves Google-hosted images whose size is a URL suffix;
/// `=s0` is the original, `=s400` a bandwidth-friendly variant.
fn small_image_variant(url: &str) -> String {
    match url.strip_suffix("=s0") {
        Some(base) => format!("{}=s400", base),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_object() -> LinkedArtObject {
        serde_json::from_value(json!({
            "id": "https://id.rijksmuseum.nl/200107952",
            "_label": "SK-C-5: Nachtwacht",
            "identified_by": [
                {
                    "type": "Identifier",
                    "content": "SK-C-5",
                    "classified_as": [{"id": "http://vocab.getty.edu/aat/300312355"}]
                },
                {
                    "type": "Name",
                    "content": "De Nachtwacht",
                    "classified_as": []
                },
                {
                    "type": "Name",
                    "content": "The Night Watch",
                    "classified_as": [{"id": "http://vocab.getty.edu/aat/300404670"}]
                }
            ],
            "produced_by": {
                "referred_to_by": [{"content": "Rembrandt van Rijn"}],
                "timespan": {
                    "begin_of_the_begin": "1642-01-01T00:00:00+00:00",
                    "end_of_the_end": "1642-12-31T23:59:59+00:00"
                },
                "technique": [{"_label": "oil paint"}]
            },
            "made_of": [{"_label": "canvas"}],
            "classified_as": [{"id": "http://vocab.getty.edu/aat/300033618", "_label": "painting"}],
            "subject_of": [{
                "digitally_carried_by": [{
                    "access_point": [{"id": "https://www.rijksmuseum.nl/nl/collectie/SK-C-5"}]
                }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_standardize_prefers_classified_name() {
        let adapter = RijksAdapter::with_base_urls("http://localhost:9", "http://localhost:9");
        let art = adapter.standardize("https://id.rijksmuseum.nl/200107952", sample_object());

        assert_eq!(art.id, "rijks:https://id.rijksmuseum.nl/200107952");
        // The AAT-classified name wins over the earlier unclassified one.
        assert_eq!(art.title, "The Night Watch");
        assert_eq!(art.artist, "Rembrandt van Rijn");
        assert_eq!(art.date.as_deref(), Some("1642"));
        assert_eq!(art.medium.as_deref(), Some("oil paint, canvas"));
        assert_eq!(art.object_number.as_deref(), Some("SK-C-5"));
        assert_eq!(art.tags, vec!["painting"]);
        assert_eq!(
            art.museum_url.as_deref(),
            Some("https://www.rijksmuseum.nl/nl/collectie/SK-C-5")
        );
        // Images only come from the legacy API, never the Linked-Art record.
        assert!(art.image_url.is_none());
    }

    #[test]
    fn test_standardize_falls_back_to_label() {
        let adapter = RijksAdapter::with_base_urls("http://localhost:9", "http://localhost:9");
        let raw: LinkedArtObject = serde_json::from_value(json!({
            "id": "https://id.rijksmuseum.nl/1",
            "_label": "Untitled sketch"
        }))
        .unwrap();

        let art = adapter.standardize("https://id.rijksmuseum.nl/1", raw);
        assert_eq!(art.title, "Untitled sketch");
        assert_eq!(art.artist, crate::artwork::UNKNOWN_ARTIST);
        assert!(art.object_number.is_none());
        assert!(art.museum_url.is_none());
    }

    #[test]
    fn test_object_number_falls_back_to_first_identifier() {
        let raw: LinkedArtObject = serde_json::from_value(json!({
            "identified_by": [
                {"type": "Identifier", "content": "RP-P-1900-123"},
                {"type": "Name", "content": "Some print"}
            ]
        }))
        .unwrap();
        assert_eq!(extract_object_number(&raw).as_deref(), Some("RP-P-1900-123"));
    }

    #[test]
    fn test_timespan_range_rendering() {
        let ts: LinkedArtTimespan = serde_json::from_value(json!({
            "begin_of_the_begin": "1642-01-01T00:00:00+00:00",
            "end_of_the_end": "1645-12-31T23:59:59+00:00"
        }))
        .unwrap();
        assert_eq!(timespan_display(&ts).as_deref(), Some("1642 - 1645"));
    }

    #[test]
    fn test_year_of_accepts_bare_dates() {
        assert_eq!(year_of("1642-01-01T00:00:00+00:00"), Some(1642));
        assert_eq!(year_of("1642-01-01"), Some(1642));
        assert_eq!(year_of("1642"), Some(1642));
        assert_eq!(year_of("n.d."), None);
    }

    #[test]
    fn test_small_image_variant() {
        assert_eq!(
            small_image_variant("https://lh3.googleusercontent.com/abc=s0"),
            "https://lh3.googleusercontent.com/abc=s400"
        );
        assert_eq!(
            small_image_variant("https://example.com/plain.jpg"),
            "https://example.com/plain.jpg"
        );
    }

    #[tokio::test]
    async fn test_fetch_by_id_rejects_non_uri_without_network() {
        let adapter = RijksAdapter::with_base_urls("http://localhost:9", "http://localhost:9");
        let err = adapter.fetch_by_id("SK-C-5").await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidIdentifier);
    }
}
