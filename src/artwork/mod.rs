//! Artwork resolution.
//!
//! Finds album artwork for a work unit through an ordered chain of remote
//! providers:
//!
//! 1. **iTunes** catalog search on band + title, filtered by artist
//! 2. **MusicBrainz** release search, each candidate probed against the
//!    **Cover Art Archive**
//! 3. **AcoustID** fingerprint identification, fed back into the catalog search
//!
//! # Architecture
//!
//! Each external service follows the same layout:
//! - `dto.rs`: exact API response types with contract tests
//! - `adapter.rs`: DTO to domain conversion
//! - `client.rs`: HTTP plumbing
//!
//! Providers (`providers.rs`) sit on top of the service traits in
//! `traits.rs` and return a [`Lookup`] outcome. The [`ResolutionPipeline`]
//! walks them in order and stops at the first hit.

pub mod acoustid;
pub mod coverart;
pub mod domain;
pub mod fetcher;
pub mod fingerprint;
pub mod itunes;
pub mod musicbrainz;
pub mod pipeline;
pub mod providers;
pub mod traits;

pub use domain::{
    ArtworkImage, ArtworkReference, ArtworkRequest, ArtworkSource, Lookup, LookupError,
};
pub use fetcher::HttpFetcher;
pub use pipeline::ResolutionPipeline;

use reqwest::StatusCode;

/// HTTP client shared by the service clients.
///
/// Falls back to a default client if the builder rejects the settings.
pub(crate) fn http_client(user_agent: &str) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to configure HTTP client ({}); using defaults", e);
            reqwest::Client::new()
        })
}

/// Map a non-success status to a lookup error.
pub(crate) fn status_error(status: StatusCode) -> LookupError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return LookupError::RateLimited;
    }
    LookupError::Network(format!(
        "HTTP {}: {}",
        status,
        status.canonical_reason().unwrap_or("Unknown")
    ))
}
