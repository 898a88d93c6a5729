use serde::Deserialize;

/// Response of the V&A search endpoint.
///
/// Unlike the Met, search records carry enough fields to normalize without
/// a per-ID detail pass.
#[derive(Debug, Clone, Deserialize)]
pub struct VaSearchResponse {
    #[serde(default)]
    pub info: Option<VaSearchInfo>,
    #[serde(default)]
    pub records: Vec<VaSearchRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaSearchInfo {
    #[serde(default)]
    pub record_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaSearchRecord {
    #[serde(rename = "systemNumber")]
    pub system_number: Option<String>,
    #[serde(rename = "accessionNumber")]
    pub accession_number: Option<String>,
    #[serde(rename = "objectType")]
    pub object_type: Option<String>,
    #[serde(rename = "_primaryTitle")]
    pub primary_title: Option<String>,
    #[serde(rename = "_primaryMaker")]
    pub primary_maker: Option<VaMaker>,
    #[serde(rename = "_primaryDate")]
    pub primary_date: Option<String>,
    #[serde(rename = "_primaryPlace")]
    pub primary_place: Option<String>,
    #[serde(rename = "_primaryImageId")]
    pub primary_image_id: Option<String>,
    #[serde(rename = "_images")]
    pub images: Option<VaImageRefs>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaMaker {
    pub name: Option<String>,
    pub association: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaImageRefs {
    #[serde(rename = "_primary_thumbnail")]
    pub primary_thumbnail: Option<String>,
    #[serde(rename = "_iiif_image_base_url")]
    pub iiif_image_base_url: Option<String>,
}

/// Envelope of the V&A detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct VaObjectResponse {
    pub record: VaObjectRecord,
}

/// One full object record from the V&A detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct VaObjectRecord {
    #[serde(rename = "systemNumber")]
    pub system_number: Option<String>,
    #[serde(rename = "accessionNumber")]
    pub accession_number: Option<String>,
    #[serde(rename = "objectType")]
    pub object_type: Option<String>,
    #[serde(default)]
    pub titles: Vec<VaTitle>,
    #[serde(rename = "artistMakerPerson", default)]
    pub artist_maker_person: Vec<VaArtistMaker>,
    #[serde(rename = "materialsAndTechniques")]
    pub materials_and_techniques: Option<String>,
    #[serde(rename = "summaryDescription")]
    pub summary_description: Option<String>,
    #[serde(rename = "briefDescription")]
    pub brief_description: Option<String>,
    #[serde(rename = "productionDates", default)]
    pub production_dates: Vec<VaProductionDate>,
    #[serde(default)]
    pub dimensions: Vec<VaDimension>,
    #[serde(default)]
    pub categories: Vec<VaCategory>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaTitle {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaArtistMaker {
    pub name: Option<VaTextValue>,
    pub association: Option<VaTextValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaTextValue {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaProductionDate {
    pub date: Option<VaTextValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaDimension {
    pub dimension: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaCategory {
    pub text: Option<String>,
}
