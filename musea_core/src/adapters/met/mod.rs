//! Metropolitan Museum adapter.
//!
//! The Met API maps almost 1:1 onto [`SearchQuery`]: a search returns a
//! list of numeric object IDs, and each record must then be fetched
//! individually (there is no batch endpoint).

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

mod types;
pub use types::{MetObject, MetSearchResponse, MetTag};

use crate::adapters::{build_client, check_status};
use crate::artwork::{CanonicalArtwork, Source};
use crate::detail::fetch_bounded;
use crate::error::MuseumError;
use crate::query::SearchQuery;
use crate::settings::SourceSettings;
use crate::throttle::RequestGate;
use crate::MuseumAdapter;

const DEFAULT_BASE_URL: &str = "https://collectionapi.metmuseum.org/public/collection/v1";

pub struct MetAdapter {
    client: Client,
    base_url: String,
    detail_concurrency: usize,
    gate: RequestGate,
}

impl MetAdapter {
    pub fn new(settings: &SourceSettings) -> Result<Self, MuseumError> {
        Ok(Self {
            client: build_client(settings.timeout_ms)?,
            base_url: DEFAULT_BASE_URL.to_string(),
            detail_concurrency: settings.detail_concurrency,
            gate: RequestGate::from_millis(settings.min_request_interval_ms),
        })
    }

    /// Create an adapter for testing with a custom base URL.
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            detail_concurrency: 5,
            gate: RequestGate::from_millis(0),
        }
    }

    // Helper method to run the search endpoint and collect native IDs
    async fn search_ids(&self, query: &SearchQuery) -> Result<Vec<u64>, MuseumError> {
        let mut url = Url::parse(&format!("{}/search", self.base_url))
            .map_err(|e| MuseumError::Upstream(format!("Failed to parse URL: {}", e)))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query.text().unwrap_or("*"));
            if let Some(department_id) = query.department_id {
                pairs.append_pair("departmentId", &department_id.to_string());
            }
            if query.has_images {
                pairs.append_pair("hasImages", "true");
            }
            if query.is_highlight {
                pairs.append_pair("isHighlight", "true");
            }
            if query.title_only {
                pairs.append_pair("title", "true");
            }
            if query.artist_only {
                pairs.append_pair("artistOrCulture", "true");
            }
        }

        self.gate.wait().await;
        let response = check_status(self.client.get(url).send().await?)?;
        let parsed: MetSearchResponse = response.json().await?;

        Ok(parsed.object_ids.unwrap_or_default())
    }

    // Helper method to fetch one object record
    async fn fetch_object(&self, object_id: u64) -> Result<MetObject, MuseumError> {
        let url = format!("{}/objects/{}", self.base_url, object_id);
        let response = check_status(self.client.get(&url).send().await?)?;
        Ok(response.json().await?)
    }

    /// Convert a raw Met record into the canonical model.
    fn standardize(&self, raw: MetObject) -> CanonicalArtwork {
        let native_id = raw
            .object_id
            .map(|id| id.to_string())
            .unwrap_or_default();

        let tags = raw
            .tags
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| t.term)
            .collect();

        let mut artwork = CanonicalArtwork::new(Source::Met, &native_id, raw.title.unwrap_or_default())
            .with_artist(raw.artist_display_name.unwrap_or_default())
            .with_date(raw.object_date.unwrap_or_default())
            .with_medium(raw.medium.unwrap_or_default())
            .with_images(raw.primary_image, raw.primary_image_small)
            .with_museum_url(raw.object_url.unwrap_or_default())
            .with_tags(tags);

        artwork.dimensions = raw.dimensions.filter(|s| !s.is_empty());
        artwork.department = raw.department.filter(|s| !s.is_empty());
        artwork.additional_images = raw.additional_images;
        artwork.is_highlight = raw.is_highlight;
        artwork.is_public_domain = raw.is_public_domain;
        artwork.object_id = raw.object_id;
        artwork.accession_number = raw.accession_number.filter(|s| !s.is_empty());
        artwork.credit_line = raw.credit_line.filter(|s| !s.is_empty());
        artwork.culture = raw.culture.filter(|s| !s.is_empty());
        artwork.period = raw.period.filter(|s| !s.is_empty());
        artwork.object_name = raw.object_name.filter(|s| !s.is_empty());
        artwork.gallery_number = raw.gallery_number.filter(|s| !s.is_empty());

        artwork
    }
}

#[async_trait]
impl MuseumAdapter for MetAdapter {
    fn source(&self) -> Source {
        Source::Met
    }

    fn description(&self) -> &'static str {
        "The Metropolitan Museum of Art collection API"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<CanonicalArtwork>, MuseumError> {
        let mut ids = self.search_ids(query).await?;
        let limit = query.effective_limit();
        ids.truncate(limit);

        debug!(count = ids.len(), "Fetching Met object records");

        let artworks = fetch_bounded(ids, self.detail_concurrency, |id| async move {
            self.gate.wait().await;
            let raw = self.fetch_object(id).await?;
            Ok(self.standardize(raw))
        })
        .await;

        Ok(artworks)
    }

    async fn fetch_by_id(&self, native_id: &str) -> Result<CanonicalArtwork, MuseumError> {
        let object_id: u64 = native_id.parse().map_err(|_| {
            MuseumError::InvalidIdentifier(format!("met:{}", native_id))
        })?;

        self.gate.wait().await;
        let raw = self.fetch_object(object_id).await?;
        Ok(self.standardize(raw))
    }
}
