use serde::Deserialize;

/// One page of the Linked-Art search endpoint (an ActivityStreams
/// OrderedCollectionPage of item URIs).
#[derive(Debug, Clone, Deserialize)]
pub struct RijksSearchPage {
    #[serde(rename = "orderedItems", default)]
    pub ordered_items: Vec<RijksSearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RijksSearchItem {
    pub id: Option<String>,
}

/// A Linked-Art (JSON-LD) object record from the metadata endpoint.
///
/// Only the branches standardize walks are modeled; the format carries far
/// more than this crate needs.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkedArtObject {
    pub id: Option<String>,
    #[serde(rename = "_label")]
    pub label: Option<String>,
    #[serde(default)]
    pub identified_by: Vec<LinkedArtName>,
    pub produced_by: Option<LinkedArtProduction>,
    #[serde(default)]
    pub made_of: Vec<LinkedArtConcept>,
    #[serde(default)]
    pub classified_as: Vec<LinkedArtConcept>,
    #[serde(default)]
    pub subject_of: Vec<LinkedArtSubject>,
}

/// An `identified_by` entry: either a `Name` or an `Identifier`, qualified
/// by AAT classification URIs.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkedArtName {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub classified_as: Vec<LinkedArtConcept>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkedArtConcept {
    pub id: Option<String>,
    #[serde(rename = "_label")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkedArtProduction {
    #[serde(default)]
    pub referred_to_by: Vec<LinkedArtStatement>,
    pub timespan: Option<LinkedArtTimespan>,
    #[serde(default)]
    pub technique: Vec<LinkedArtConcept>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkedArtStatement {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkedArtTimespan {
    pub begin_of_the_begin: Option<String>,
    pub end_of_the_end: Option<String>,
}

/// `subject_of` → `digitally_carried_by` → `access_point` leads to the
/// museum's own object page.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkedArtSubject {
    #[serde(default)]
    pub digitally_carried_by: Vec<LinkedArtDigitalObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkedArtDigitalObject {
    #[serde(default)]
    pub access_point: Vec<LinkedArtRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkedArtRef {
    pub id: Option<String>,
}

/// Response of the legacy collection API, the only upstream that resolves
/// image URLs.
#[derive(Debug, Clone, Deserialize)]
pub struct RijksLegacyResponse {
    #[serde(rename = "artObject")]
    pub art_object: Option<RijksLegacyArtObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RijksLegacyArtObject {
    #[serde(rename = "webImage")]
    pub web_image: Option<RijksWebImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RijksWebImage {
    pub url: Option<String>,
}
