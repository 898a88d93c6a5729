use serde::Deserialize;

/// Response of the Met search endpoint.
///
/// `objectIDs` is `null` (not an empty array) when nothing matched.
#[derive(Debug, Clone, Deserialize)]
pub struct MetSearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "objectIDs", default)]
    pub object_ids: Option<Vec<u64>>,
}

/// One object record from the Met detail endpoint.
///
/// Everything is optional; records are uneven and standardize defaults
/// rather than fails.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetObject {
    #[serde(rename = "objectID")]
    pub object_id: Option<u64>,
    pub title: Option<String>,
    pub artist_display_name: Option<String>,
    pub object_date: Option<String>,
    pub medium: Option<String>,
    pub dimensions: Option<String>,
    pub department: Option<String>,
    pub primary_image: Option<String>,
    pub primary_image_small: Option<String>,
    #[serde(default)]
    pub additional_images: Vec<String>,
    #[serde(rename = "objectURL")]
    pub object_url: Option<String>,
    pub is_highlight: Option<bool>,
    pub is_public_domain: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<MetTag>>,
    pub accession_number: Option<String>,
    pub credit_line: Option<String>,
    pub culture: Option<String>,
    pub period: Option<String>,
    pub object_name: Option<String>,
    #[serde(rename = "GalleryNumber")]
    pub gallery_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetTag {
    pub term: Option<String>,
}
