//! Canonical artwork model.
//!
//! Every adapter normalizes its upstream schema into [`CanonicalArtwork`];
//! nothing downstream of `standardize` sees a museum-specific shape.

use serde::{Deserialize, Serialize};

use crate::composite_id;

/// Placeholder title when the upstream record has none.
pub const UNTITLED: &str = "Untitled";

/// Placeholder attribution when the upstream record has none.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// The museums this crate can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Metropolitan Museum of Art, New York
    Met,
    /// Rijksmuseum, Amsterdam
    Rijks,
    /// Victoria & Albert Museum, London
    Va,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Met, Source::Rijks, Source::Va];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Met => "met",
            Source::Rijks => "rijks",
            Source::Va => "va",
        }
    }

    pub fn parse(s: &str) -> Option<Source> {
        match s {
            "met" => Some(Source::Met),
            "rijks" => Some(Source::Rijks),
            "va" => Some(Source::Va),
            _ => None,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized artwork record from any museum.
///
/// Fields a given source does not supply stay `None`; adapters never
/// invent placeholder values beyond the title/artist defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalArtwork {
    /// Composite identifier, `"<source>:<nativeId>"`.
    pub id: String,

    /// Originating museum.
    pub source: Source,

    /// Display title; `"Untitled"` when the record has none.
    pub title: String,

    /// Display attribution; `"Unknown Artist"` when the record has none.
    pub artist: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_image_url: Option<String>,

    /// Further image URLs, in upstream order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_images: Vec<String>,

    /// Deep link to the artwork's page on the museum's own site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub museum_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_highlight: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public_domain: Option<bool>,

    /// Subject/classification terms; deduplicated, order not meaningful.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    // --- Met-specific extension fields ---
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accession_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_line: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_number: Option<String>,

    // --- Rijksmuseum-specific ---
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_number: Option<String>,

    // --- V&A-specific ---
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
}

impl CanonicalArtwork {
    /// Create a record with required fields; empty title/artist fall back to
    /// the placeholders.
    pub fn new(source: Source, native_id: &str, title: impl Into<String>) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            title
        };

        Self {
            id: composite_id::encode(source, native_id),
            source,
            title,
            artist: UNKNOWN_ARTIST.to_string(),
            date: None,
            medium: None,
            dimensions: None,
            department: None,
            description: None,
            image_url: None,
            small_image_url: None,
            additional_images: Vec::new(),
            museum_url: None,
            is_highlight: None,
            is_public_domain: None,
            tags: Vec::new(),
            object_id: None,
            accession_number: None,
            credit_line: None,
            culture: None,
            period: None,
            object_name: None,
            gallery_number: None,
            object_number: None,
            system_number: None,
            object_type: None,
        }
    }

    /// Builder method to set the artist, keeping the placeholder for
    /// empty/whitespace input.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        let artist = artist.into();
        if !artist.trim().is_empty() {
            self.artist = artist;
        }
        self
    }

    /// Builder method to add a date string.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = non_empty(date.into());
        self
    }

    /// Builder method to add a medium/technique string.
    pub fn with_medium(mut self, medium: impl Into<String>) -> Self {
        self.medium = non_empty(medium.into());
        self
    }

    /// Builder method to add a primary image and its small variant.
    pub fn with_images(mut self, image_url: Option<String>, small: Option<String>) -> Self {
        self.image_url = image_url.and_then(non_empty);
        self.small_image_url = small.and_then(non_empty);
        self
    }

    /// Builder method to add the museum's own page URL.
    pub fn with_museum_url(mut self, url: impl Into<String>) -> Self {
        self.museum_url = non_empty(url.into());
        self
    }

    /// Builder method to set tags, dropping empties and duplicates.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.tags = tags
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .filter(|t| seen.insert(t.clone()))
            .collect();
        self
    }

    /// Whether any resolvable image URL is attached.
    pub fn has_image(&self) -> bool {
        self.image_url.is_some() || self.small_image_url.is_some()
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
