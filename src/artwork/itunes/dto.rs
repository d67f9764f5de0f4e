//! iTunes Search API Data Transfer Objects
//!
//! These types match what the iTunes Search API returns for `entity=album`.
//! DO NOT use these types outside the itunes module - convert to domain types.
//!
//! Example response:
//! ```json
//! {
//!   "resultCount": 1,
//!   "results": [{
//!     "wrapperType": "collection",
//!     "collectionType": "Album",
//!     "artistName": "Cosmonkey",
//!     "collectionName": "Rainy - Single",
//!     "artworkUrl100": "https://is1-ssl.mzstatic.com/image/thumb/.../100x100bb.jpg"
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Top-level search response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Number of entries in `results`
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<AlbumResult>,
}

/// A single album (collection) result
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResult {
    /// Artist credited on the collection
    #[serde(default)]
    pub artist_name: String,
    /// Album title
    #[serde(default)]
    pub collection_name: String,
    /// 100px artwork URL
    pub artwork_url100: Option<String>,
    /// Collection type (Album, Compilation, ...)
    pub collection_type: Option<String>,
    /// Release date (ISO-8601)
    pub release_date: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
