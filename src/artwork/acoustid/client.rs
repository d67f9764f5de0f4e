//! AcoustID HTTP client
//!
//! See: https://acoustid.org/webservice
//!
//! ## URL Encoding of the Meta Parameter
//! The API uses `+` as a separator in `meta` (`recordings+compress`).
//! Percent-encoding it to `%2B` makes the API silently drop the requested
//! metadata, so the URL is built by hand and only the key and fingerprint
//! are encoded.
//!
//! GET is used: fingerprints (~3400 chars) fit in URLs, and POST does not
//! return metadata reliably.

use super::{adapter, dto};
use crate::artwork::domain::{AudioFingerprint, FingerprintMatch, LookupError};
use crate::artwork::{http_client, status_error};
use crate::config::ProvidersConfig;

/// AcoustID API client
pub struct AcoustIdClient {
    api_key: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl AcoustIdClient {
    /// Create a client with the given API key
    pub fn new(api_key: impl Into<String>, config: &ProvidersConfig) -> Self {
        Self {
            api_key: api_key.into(),
            http_client: http_client(&config.user_agent()),
            base_url: config.acoustid_url.clone(),
        }
    }

    /// Look up a fingerprint and return the matches in service order
    pub async fn lookup(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<Vec<FingerprintMatch>, LookupError> {
        let response = self.send_lookup_request(fingerprint).await?;
        adapter::to_matches(response)
    }

    fn lookup_url(&self, fingerprint: &AudioFingerprint) -> String {
        // The + separators must stay literal
        format!(
            "{}?client={}&duration={}&fingerprint={}&meta=recordings+compress",
            self.base_url,
            urlencoding::encode(&self.api_key),
            fingerprint.duration_secs,
            urlencoding::encode(&fingerprint.fingerprint)
        )
    }

    async fn send_lookup_request(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<dto::LookupResponse, LookupError> {
        let url = self.lookup_url(fingerprint);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // AcoustID reports bad keys as 400 with a JSON body
            if let Ok(dto::LookupResponse {
                error: Some(error), ..
            }) = response.json::<dto::LookupResponse>().await
            {
                return Err(LookupError::ApiError(error.message));
            }
            return Err(status_error(status));
        }

        response
            .json::<dto::LookupResponse>()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))
    }
}
