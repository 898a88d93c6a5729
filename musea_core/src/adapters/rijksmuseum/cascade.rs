//! Search strategy cascade.
//!
//! The Linked-Art search endpoint has fielded parameters but no general
//! free-text query, so a free-text search tries the fields most likely to
//! match, in order, stopping at the first non-empty result: title, then
//! creator, then description. When everything comes up empty (including
//! when there is no query text at all) a generic `type=painting` search
//! keeps the endpoint from returning nothing.
//!
//! The steps are sequential on purpose: each one only runs because the
//! previous one returned an empty page.

use std::future::Future;
use tracing::debug;

use crate::error::MuseumError;
use crate::query::SearchQuery;

/// The object type used by the last-resort strategy.
pub(crate) const FALLBACK_TYPE: &str = "painting";

/// One strategy in the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CascadeStep {
    /// Caller supplied explicit field hints; terminal, no cascade.
    Fielded {
        creator: Option<String>,
        object_type: Option<String>,
    },
    Title(String),
    Creator(String),
    Description(String),
    /// Generic type search so the endpoint returns something.
    FallbackType,
}

/// Build the ordered strategy list for a query.
pub(crate) fn build_plan(query: &SearchQuery) -> Vec<CascadeStep> {
    if query.creator.is_some() || query.object_type.is_some() {
        return vec![CascadeStep::Fielded {
            creator: query.creator.clone(),
            object_type: query.object_type.clone(),
        }];
    }

    let mut plan = Vec::new();
    if let Some(q) = query.text() {
        let q = q.to_string();
        if query.title_only {
            plan.push(CascadeStep::Title(q));
            return plan;
        }
        if query.artist_only {
            plan.push(CascadeStep::Creator(q));
            return plan;
        }
        plan.push(CascadeStep::Title(q.clone()));
        plan.push(CascadeStep::Creator(q.clone()));
        plan.push(CascadeStep::Description(q));
    }
    plan.push(CascadeStep::FallbackType);
    plan
}

/// Execute the plan, short-circuiting on the first non-empty result.
///
/// Later steps are never started once a step yields results; an upstream
/// error aborts the cascade rather than masking it with the next strategy.
pub(crate) async fn run<F, Fut>(plan: Vec<CascadeStep>, exec: F) -> Result<Vec<String>, MuseumError>
where
    F: Fn(CascadeStep) -> Fut,
    Fut: Future<Output = Result<Vec<String>, MuseumError>>,
{
    for step in plan {
        debug!(step = ?step, "Executing search strategy");
        let ids = exec(step).await?;
        if !ids.is_empty() {
            return Ok(ids);
        }
    }
    Ok(Vec::new())
}
