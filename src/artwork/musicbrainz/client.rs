//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.

use reqwest::StatusCode;

use super::{adapter, dto};
use crate::artwork::domain::{CandidateRelease, LookupError};
use crate::artwork::{http_client, status_error};
use crate::config::ProvidersConfig;

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
    limit: u32,
}

/// Build the Lucene query for a release by one artist.
///
/// Both values are quoted as phrases, so quotes and backslashes inside
/// them are escaped.
pub fn release_query(band: &str, title: &str) -> String {
    format!(
        "release:\"{}\" AND artist:\"{}\"",
        escape_phrase(title),
        escape_phrase(band)
    )
}

fn escape_phrase(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl MusicBrainzClient {
    /// Create a client from the provider settings
    pub fn new(config: &ProvidersConfig) -> Self {
        Self {
            http_client: http_client(&config.user_agent()),
            base_url: config.musicbrainz_url.clone(),
            limit: config.release_limit,
        }
    }

    /// Search releases by artist and title, best match first
    pub async fn search_releases(
        &self,
        band: &str,
        title: &str,
    ) -> Result<Vec<CandidateRelease>, LookupError> {
        let response = self.send_search_request(band, title).await?;
        Ok(adapter::to_candidates(response))
    }

    fn search_url(&self, band: &str, title: &str) -> String {
        format!(
            "{}/release/?query={}&fmt=json&limit={}",
            self.base_url,
            urlencoding::encode(&release_query(band, title)),
            self.limit
        )
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(
        &self,
        band: &str,
        title: &str,
    ) -> Result<dto::ReleaseSearchResponse, LookupError> {
        let url = self.search_url(band, title);
        tracing::debug!("MusicBrainz search: {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();

        // MusicBrainz answers 503 when the rate limit is exceeded
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(LookupError::RateLimited);
        }

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(LookupError::ApiError(error.error));
            }
            return Err(status_error(status));
        }

        response
            .json::<dto::ReleaseSearchResponse>()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))
    }
}

impl Default for MusicBrainzClient {
    fn default() -> Self {
        Self::new(&ProvidersConfig::default())
    }
}
