//! iTunes Search HTTP client
//!
//! `GET <base>?term=<query>&media=music&entity=album&limit=<n>`

use super::{adapter, dto};
use crate::artwork::domain::{CatalogAlbum, LookupError};
use crate::artwork::{http_client, status_error};
use crate::config::ProvidersConfig;

/// Largest catalog page considered per query
const MAX_RESULTS: u32 = 10;

/// iTunes Search API client
pub struct ItunesClient {
    http_client: reqwest::Client,
    base_url: String,
    limit: u32,
}

impl ItunesClient {
    /// Create a client from the provider settings
    pub fn new(config: &ProvidersConfig) -> Self {
        Self {
            http_client: http_client(&config.user_agent()),
            base_url: config.catalog_url.clone(),
            limit: config.catalog_limit.clamp(1, MAX_RESULTS),
        }
    }

    /// Search albums matching free text, in API order
    pub async fn search_albums(&self, term: &str) -> Result<Vec<CatalogAlbum>, LookupError> {
        let response = self.send_search_request(term).await?;
        Ok(adapter::to_albums(response))
    }

    fn search_url(&self, term: &str) -> String {
        format!(
            "{}?term={}&media=music&entity=album&limit={}",
            self.base_url,
            urlencoding::encode(term),
            self.limit
        )
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(&self, term: &str) -> Result<dto::SearchResponse, LookupError> {
        let url = self.search_url(term);
        tracing::debug!("iTunes search: {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))
    }
}

impl Default for ItunesClient {
    fn default() -> Self {
        Self::new(&ProvidersConfig::default())
    }
}
