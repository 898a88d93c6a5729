//! Victoria & Albert Museum adapter.
//!
//! V&A search results come back as full records, so there is no per-ID
//! detail pass on the search path. The API has no dedicated title/artist
//! parameter either; restricted searches fetch a superset and filter
//! locally after normalization.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

mod types;
pub use types::{
    VaArtistMaker, VaCategory, VaDimension, VaImageRefs, VaMaker, VaObjectRecord,
    VaObjectResponse, VaProductionDate, VaSearchInfo, VaSearchRecord, VaSearchResponse,
    VaTextValue, VaTitle,
};

use crate::adapters::{build_client, check_status};
use crate::artwork::{CanonicalArtwork, Source};
use crate::error::MuseumError;
use crate::query::SearchQuery;
use crate::settings::SourceSettings;
use crate::throttle::RequestGate;
use crate::MuseumAdapter;

const DEFAULT_BASE_URL: &str = "https://api.vam.ac.uk/v2";
const IIIF_BASE_URL: &str = "https://framemark.vam.ac.uk/collections";
const ITEM_PAGE_BASE: &str = "https://collections.vam.ac.uk/item";

/// Superset factor for locally-filtered title/artist searches.
const LOCAL_FILTER_OVERFETCH: u32 = 3;

/// Hard cap the upstream puts on page_size.
const MAX_PAGE_SIZE: u32 = 100;

pub struct VaAdapter {
    client: Client,
    base_url: String,
    gate: RequestGate,
}

impl VaAdapter {
    pub fn new(settings: &SourceSettings) -> Result<Self, MuseumError> {
        Ok(Self {
            client: build_client(settings.timeout_ms)?,
            base_url: DEFAULT_BASE_URL.to_string(),
            gate: RequestGate::from_millis(settings.min_request_interval_ms),
        })
    }

    /// Create an adapter for testing with a custom base URL.
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            gate: RequestGate::from_millis(0),
        }
    }

    // Helper method to run the search endpoint
    async fn search_records(
        &self,
        query: &SearchQuery,
        page_size: u32,
    ) -> Result<Vec<VaSearchRecord>, MuseumError> {
        let mut url = Url::parse(&format!("{}/objects/search", self.base_url))
            .map_err(|e| MuseumError::Upstream(format!("Failed to parse URL: {}", e)))?;

        {
            let mut pairs = url.query_pairs_mut();
            if let Some(q) = query.text() {
                pairs.append_pair("q", q);
            }
            pairs.append_pair("page_size", &page_size.to_string());
            if query.has_images {
                pairs.append_pair("images_exist", "1");
            }
        }

        self.gate.wait().await;
        let response = check_status(self.client.get(url).send().await?)?;
        let parsed: VaSearchResponse = response.json().await?;

        Ok(parsed.records)
    }

    // Helper method to fetch one full record
    async fn fetch_record(&self, system_number: &str) -> Result<VaObjectRecord, MuseumError> {
        let url = format!(
            "{}/museumobject/{}",
            self.base_url,
            urlencoding::encode(system_number)
        );
        let response = check_status(self.client.get(&url).send().await?)?;
        let parsed: VaObjectResponse = response.json().await?;
        Ok(parsed.record)
    }

    /// Convert a raw search record into the canonical model.
    fn standardize_search_record(&self, raw: VaSearchRecord) -> CanonicalArtwork {
        let native_id = raw.system_number.clone().unwrap_or_default();

        let (image_url, small_image_url) = search_record_images(&raw);

        let mut artwork =
            CanonicalArtwork::new(Source::Va, &native_id, raw.primary_title.unwrap_or_default())
                .with_artist(
                    raw.primary_maker
                        .and_then(|m| m.name)
                        .unwrap_or_default(),
                )
                .with_date(raw.primary_date.unwrap_or_default())
                .with_images(image_url, small_image_url)
                .with_museum_url(item_page(&native_id));

        artwork.system_number = raw.system_number.filter(|s| !s.is_empty());
        artwork.accession_number = raw.accession_number.filter(|s| !s.is_empty());
        artwork.object_type = raw.object_type.filter(|s| !s.is_empty());

        artwork
    }

    /// Convert a raw full record into the canonical model.
    fn standardize_record(&self, raw: VaObjectRecord) -> CanonicalArtwork {
        let native_id = raw.system_number.clone().unwrap_or_default();

        let title = raw
            .titles
            .iter()
            .filter_map(|t| t.title.as_deref())
            .find(|t| !t.is_empty())
            .unwrap_or_default()
            .to_string();

        let artist = raw
            .artist_maker_person
            .iter()
            .filter_map(|m| m.name.as_ref().and_then(|n| n.text.as_deref()))
            .find(|n| !n.is_empty())
            .unwrap_or_default()
            .to_string();

        let date = raw
            .production_dates
            .iter()
            .filter_map(|d| d.date.as_ref().and_then(|t| t.text.as_deref()))
            .find(|d| !d.is_empty())
            .unwrap_or_default()
            .to_string();

        let description = raw
            .summary_description
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| raw.brief_description.clone().filter(|s| !s.is_empty()));

        let mut image_ids = raw.images.iter().filter(|id| !id.is_empty());
        let primary_image_id = image_ids.next();
        let additional_images: Vec<String> = image_ids.map(|id| iiif_full(id)).collect();

        let tags = raw
            .categories
            .into_iter()
            .filter_map(|c| c.text)
            .collect();

        let mut artwork = CanonicalArtwork::new(Source::Va, &native_id, title)
            .with_artist(artist)
            .with_date(date)
            .with_medium(raw.materials_and_techniques.unwrap_or_default())
            .with_images(
                primary_image_id.map(|id| iiif_full(id)),
                primary_image_id.map(|id| iiif_thumbnail(id)),
            )
            .with_museum_url(item_page(&native_id))
            .with_tags(tags);

        artwork.description = description;
        artwork.dimensions = format_dimensions(&raw.dimensions);
        artwork.additional_images = additional_images;
        artwork.system_number = raw.system_number.filter(|s| !s.is_empty());
        artwork.accession_number = raw.accession_number.filter(|s| !s.is_empty());
        artwork.object_type = raw.object_type.filter(|s| !s.is_empty());

        artwork
    }
}

#[async_trait]
impl MuseumAdapter for VaAdapter {
    fn source(&self) -> Source {
        Source::Va
    }

    fn description(&self) -> &'static str {
        "The Victoria and Albert Museum collections API"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<CanonicalArtwork>, MuseumError> {
        let limit = query.effective_limit();
        let restricted = query.title_only || query.artist_only;

        // No upstream title/artist parameter; overfetch and filter locally.
        let page_size = if restricted {
            (limit as u32 * LOCAL_FILTER_OVERFETCH).min(MAX_PAGE_SIZE)
        } else {
            (limit as u32).min(MAX_PAGE_SIZE)
        };

        let records = self.search_records(query, page_size).await?;
        debug!(count = records.len(), "Normalizing V&A search records");

        let mut artworks: Vec<CanonicalArtwork> = records
            .into_iter()
            .map(|raw| self.standardize_search_record(raw))
            .collect();

        if restricted {
            if let Some(q) = query.text() {
                let needle = q.to_lowercase();
                artworks.retain(|art| {
                    (query.title_only && art.title.to_lowercase().contains(&needle))
                        || (query.artist_only && art.artist.to_lowercase().contains(&needle))
                });
            }
        }

        artworks.truncate(limit);
        Ok(artworks)
    }

    async fn fetch_by_id(&self, native_id: &str) -> Result<CanonicalArtwork, MuseumError> {
        self.gate.wait().await;
        let raw = self.fetch_record(native_id).await?;
        Ok(self.standardize_record(raw))
    }
}

fn item_page(system_number: &str) -> String {
    if system_number.is_empty() {
        String::new()
    } else {
        format!("{}/{}", ITEM_PAGE_BASE, system_number)
    }
}

fn iiif_full(image_id: &str) -> String {
    format!("{}/{}/full/full/0/default.jpg", IIIF_BASE_URL, image_id)
}

fn iiif_thumbnail(image_id: &str) -> String {
    format!("{}/{}/full/!250,250/0/default.jpg", IIIF_BASE_URL, image_id)
}

/// Primary/small image URLs for a search record, preferring the API's own
/// IIIF references over reconstructing them from the image ID.
fn search_record_images(raw: &VaSearchRecord) -> (Option<String>, Option<String>) {
    let from_refs = raw.images.as_ref().and_then(|refs| {
        refs.iiif_image_base_url
            .as_ref()
            .map(|base| format!("{}full/full/0/default.jpg", base))
    });

    let image_url = from_refs.or_else(|| {
        raw.primary_image_id
            .as_ref()
            .filter(|id| !id.is_empty())
            .map(|id| iiif_full(id))
    });

    let small_image_url = raw
        .images
        .as_ref()
        .and_then(|refs| refs.primary_thumbnail.clone())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            raw.primary_image_id
                .as_ref()
                .filter(|id| !id.is_empty())
                .map(|id| iiif_thumbnail(id))
        });

    (image_url, small_image_url)
}

fn format_dimensions(dimensions: &[VaDimension]) -> Option<String> {
    let parts: Vec<String> = dimensions
        .iter()
        .filter_map(|d| {
            let name = d.dimension.as_deref()?;
            let value = d.value?;
            match d.unit.as_deref() {
                Some(unit) => Some(format!("{} {} {}", name, value, unit)),
                None => Some(format!("{} {}", name, value)),
            }
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
