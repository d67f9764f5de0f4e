//! Wire types for the MusicBrainz release search (`/ws/2/release?fmt=json`).
//!
//! Only this module's adapter reads them; the rest of the crate sees
//! [`CandidateRelease`](crate::artwork::domain::CandidateRelease).
//!
//! Reference: https://musicbrainz.org/doc/MusicBrainz_API/Search#Release

use serde::{Deserialize, Serialize};

/// Release search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseSearchResponse {
    /// Total number of hits (may exceed the page)
    pub count: Option<u32>,
    /// Releases on this page, best search score first
    #[serde(default)]
    pub releases: Vec<Release>,
}

/// One release hit
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Release {
    /// Release MBID, also the Cover Art Archive key
    pub id: String,
    /// Release title
    #[serde(default)]
    pub title: String,
    /// Search relevance (0-100)
    pub score: Option<u32>,
    pub status: Option<String>,
    /// Partial dates allowed ("2004", "2004-06")
    pub date: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Artist credits
    #[serde(default)]
    pub artist_credit: Vec<ArtistCredit>,
}

/// One credited artist
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistCredit {
    /// The artist
    pub artist: Option<Artist>,
    /// Name as printed on this release
    pub name: Option<String>,
    /// Text up to the next credit, e.g. " & "
    pub joinphrase: Option<String>,
}

/// Artist info
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Artist {
    /// MusicBrainz artist ID
    pub id: String,
    /// Official artist name
    pub name: String,
    pub sort_name: Option<String>,
}

/// Body sent with a 4xx/5xx
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
    pub help: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// Trimmed copies of real search responses.
// ============================================================================
