//! Wire types for the AcoustID `/v2/lookup` endpoint.
//!
//! Shaped for `meta=recordings+compress`: each result carries its matched
//! recordings, each recording its credited artists. Only the adapter in this
//! module reads them; everything else sees [`FingerprintMatch`].
//!
//! Reference: https://acoustid.org/webservice#lookup
//!
//! [`FingerprintMatch`]: crate::artwork::domain::FingerprintMatch

use serde::{Deserialize, Serialize};

/// Body of a lookup call, success or failure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<LookupResult>,
    /// Present when `status` is `"error"`
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub code: i32,
    pub message: String,
}

/// One fingerprint cluster the service matched
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupResult {
    /// AcoustID track id
    pub id: String,
    /// 0.0 to 1.0
    pub score: f32,
    #[serde(default)]
    pub recordings: Vec<Recording>,
}

/// Recording linked to a fingerprint cluster
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Recording {
    pub id: String,
    pub title: Option<String>,
    /// Seconds, sent as a float
    pub duration: Option<f64>,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

/// Artist credit on a recording
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    /// MusicBrainz artist ID
    pub id: String,
    pub name: String,
    /// Text joining this artist to the next one (e.g. " feat. ")
    pub joinphrase: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// Payloads below are trimmed copies of real lookup responses.
// ============================================================================
