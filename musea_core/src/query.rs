//! Search query value object.

use serde::{Deserialize, Serialize};

use crate::artwork::Source;

/// Default result count when the caller gives none.
pub const DEFAULT_LIMIT: u32 = 20;

/// Hard ceiling on the result count regardless of what the caller asks for.
pub const MAX_LIMIT: u32 = 200;

/// Which museums a search addresses.
///
/// On the wire this is a plain string: `"all"` or one museum name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceSelector {
    /// Every registered museum
    #[default]
    All,
    /// Exactly one museum
    One(Source),
}

impl SourceSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSelector::All => "all",
            SourceSelector::One(source) => source.as_str(),
        }
    }
}

impl From<SourceSelector> for String {
    fn from(selector: SourceSelector) -> String {
        selector.as_str().to_string()
    }
}

impl TryFrom<String> for SourceSelector {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "all" {
            return Ok(SourceSelector::All);
        }
        Source::parse(&value)
            .map(SourceSelector::One)
            .ok_or_else(|| format!("unknown source {value:?}"))
    }
}

/// A search request as handed to the aggregator.
///
/// Source-specific hints are ignored by adapters they don't apply to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query. The Rijksmuseum has no free-text parameter; its
    /// adapter runs the strategy cascade over this value instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    #[serde(default)]
    pub source: SourceSelector,

    /// Only return artworks with a resolvable image.
    #[serde(default)]
    pub has_images: bool,

    /// Caller-requested result count; clamped to [`MAX_LIMIT`].
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Met department filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u32>,

    /// Met highlights-only filter.
    #[serde(default)]
    pub is_highlight: bool,

    /// Rijksmuseum creator hint; skips the cascade when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    /// Rijksmuseum object-type hint; skips the cascade when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    /// Restrict matching to titles.
    #[serde(default)]
    pub title_only: bool,

    /// Restrict matching to artist names.
    #[serde(default)]
    pub artist_only: bool,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl SearchQuery {
    /// Create a free-text query against all sources.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            limit: DEFAULT_LIMIT,
            ..Self::default()
        }
    }

    /// Builder method to address a single museum.
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = SourceSelector::One(source);
        self
    }

    /// Builder method to set the requested result count.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Builder method to require images.
    pub fn with_images_only(mut self) -> Self {
        self.has_images = true;
        self
    }

    /// Builder method to set the Met department filter.
    pub fn with_department(mut self, department_id: u32) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Builder method to set the Rijksmuseum creator hint.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Builder method to set the Rijksmuseum object-type hint.
    pub fn with_object_type(mut self, object_type: impl Into<String>) -> Self {
        self.object_type = Some(object_type.into());
        self
    }

    /// The effective result ceiling for this query.
    pub fn effective_limit(&self) -> usize {
        let limit = if self.limit == 0 {
            DEFAULT_LIMIT
        } else {
            self.limit
        };
        limit.min(MAX_LIMIT) as usize
    }

    /// Free-text query, trimmed, `None` when empty.
    pub fn text(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}
