//! Artwork download.

use async_trait::async_trait;

use super::domain::{ArtworkImage, LookupError};
use super::traits::ArtworkFetcher;
use super::{http_client, status_error};
use crate::config::ProvidersConfig;

/// Single GET per reference; redirects are followed, nothing is retried.
pub struct HttpFetcher {
    http_client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ProvidersConfig) -> Self {
        Self {
            http_client: http_client(&config.user_agent()),
        }
    }

    /// Download an image from a URL
    pub async fn download_image(&self, url: &str) -> Result<ArtworkImage, LookupError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();

        let data = response
            .bytes()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?
            .to_vec();

        if data.is_empty() {
            return Err(LookupError::InvalidResponse(format!("empty body from {}", url)));
        }

        Ok(ArtworkImage { data, mime_type })
    }
}

#[async_trait]
impl ArtworkFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<ArtworkImage, LookupError> {
        self.download_image(url).await
    }
}
