//! Multi-source search aggregation.
//!
//! This module provides:
//! - `AggregateSearchResult`: merged, deduplicated, bounded results
//! - `Aggregator`: engine for parallel multi-museum search and
//!   composite-ID lookup
//!
//! # Example
//!
//! ```ignore
//! use musea_core::{build_default_registry, Aggregator, SearchQuery, Settings};
//!
//! let registry = build_default_registry(Settings::builtin())?;
//! let aggregator = Aggregator::new(&registry);
//! let results = aggregator.search(&SearchQuery::new("monet")).await?;
//! ```

mod engine;
mod types;

pub use engine::Aggregator;
pub use types::{AggregateSearchResult, SourceFailure};
