//! Per-museum source adapters.
//!
//! Each adapter knows one upstream's query parameters, ID model, and JSON
//! shape, and converts raw responses into [`CanonicalArtwork`]. Raw shapes
//! live in each adapter's `types.rs` and never leak past `standardize`.
//!
//! [`CanonicalArtwork`]: crate::artwork::CanonicalArtwork

pub mod met;
pub mod rijksmuseum;
pub mod vanda;

use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use crate::error::MuseumError;

/// User agent sent on every request; collection APIs ask clients to
/// identify themselves.
pub(crate) const USER_AGENT: &str = concat!(
    "Musea/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/musea-project/musea)"
);

/// Build the HTTP client an adapter uses for all of its requests.
///
/// The transport timeout bounds one request; the source's overall deadline
/// is enforced by the aggregator around the whole search.
pub(crate) fn build_client(request_timeout_ms: u64) -> Result<Client, MuseumError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_millis(request_timeout_ms))
        .build()?;
    Ok(client)
}

/// Map upstream status codes into the shared failure taxonomy.
///
/// 404 is `NotFound`, 429 is `RateLimited` (keeping the `Retry-After` hint
/// when present), any other non-2xx is `Upstream`.
pub(crate) fn check_status(response: Response) -> Result<Response, MuseumError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(MuseumError::NotFound);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        return Err(MuseumError::RateLimited { retry_after });
    }

    if !status.is_success() {
        return Err(MuseumError::Upstream(format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    Ok(response)
}
