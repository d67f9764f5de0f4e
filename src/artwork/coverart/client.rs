//! Cover Art Archive HTTP client
//!
//! API: https://coverartarchive.org

use reqwest::StatusCode;

use super::dto;
use crate::artwork::domain::{ArchiveImage, LookupError};
use crate::artwork::{http_client, status_error};
use crate::config::ProvidersConfig;

/// Cover Art Archive client
pub struct CoverArtClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CoverArtClient {
    /// Create a client from the provider settings
    pub fn new(config: &ProvidersConfig) -> Self {
        Self {
            http_client: http_client(&config.user_agent()),
            base_url: config.coverart_url.clone(),
        }
    }

    /// Redirect URL for the 500px front cover of a release
    pub fn front_cover_url(&self, release_id: &str) -> String {
        format!("{}/release/{}/front-500", self.base_url, release_id)
    }

    /// List the images stored for a release.
    ///
    /// A release the archive has never seen answers 404; that is reported
    /// as an empty listing rather than an error.
    pub async fn list_images(&self, release_id: &str) -> Result<Vec<ArchiveImage>, LookupError> {
        let url = format!("{}/release/{}", self.base_url, release_id);

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        if !status.is_success() {
            return Err(status_error(status));
        }

        let listing = response
            .json::<dto::CoverArtResponse>()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        Ok(to_images(listing))
    }
}

fn to_images(listing: dto::CoverArtResponse) -> Vec<ArchiveImage> {
    listing
        .images
        .into_iter()
        .map(|image| ArchiveImage {
            front: image.front,
            image: image.image,
        })
        .collect()
}

impl Default for CoverArtClient {
    fn default() -> Self {
        Self::new(&ProvidersConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_cover_url() {
        let client = CoverArtClient::default();
        assert_eq!(
            client.front_cover_url("76df3287-6cda-33eb-8e9a-044b5e15ffdd"),
            "https://coverartarchive.org/release/76df3287-6cda-33eb-8e9a-044b5e15ffdd/front-500"
        );
    }

    #[test]
    fn test_to_images_keeps_order_and_front_flag() {
        let listing: dto::CoverArtResponse = serde_json::from_str(
            r#"{"images": [
                {"front": false, "image": "http://x/back.jpg"},
                {"front": true, "image": "http://x/front.jpg"}
            ]}"#,
        )
        .unwrap();

        let images = to_images(listing);
        assert_eq!(
            images,
            vec![
                ArchiveImage {
                    front: false,
                    image: Some("http://x/back.jpg".to_string())
                },
                ArchiveImage {
                    front: true,
                    image: Some("http://x/front.jpg".to_string())
                },
            ]
        );
    }
}
