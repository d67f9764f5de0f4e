//! Internal domain models for artwork resolution.
//!
//! Providers and drivers speak only these types. Each service module turns
//! its wire format into them in its own adapter.

use std::fmt;
use std::path::Path;

/// Which provider produced an artwork reference (diagnostics only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkSource {
    /// iTunes catalog search on band + title
    Catalog,
    /// MusicBrainz release search probed against the Cover Art Archive
    ReleaseArchive,
    /// Catalog search driven by an AcoustID fingerprint match
    Fingerprint,
}

impl fmt::Display for ArtworkSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Catalog => "iTunes",
            Self::ReleaseArchive => "MusicBrainz + Cover Art Archive",
            Self::Fingerprint => "AcoustID + iTunes",
        };
        f.write_str(name)
    }
}

/// A resolved locator for a candidate image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkReference {
    pub url: String,
    pub source: ArtworkSource,
}

impl ArtworkReference {
    pub fn new(url: impl Into<String>, source: ArtworkSource) -> Self {
        Self {
            url: url.into(),
            source,
        }
    }
}

/// Downloaded artwork, shared read-only across every track of an album
#[derive(Debug, Clone)]
pub struct ArtworkImage {
    /// Image data (JPEG or PNG)
    pub data: Vec<u8>,
    /// MIME type reported by the server
    pub mime_type: String,
}

/// What the pipeline is asked to find artwork for.
///
/// Built from one work unit: an album folder or a loose track.
#[derive(Debug, Clone, Copy)]
pub struct ArtworkRequest<'a> {
    /// Expected artist; `None` means no artist verification is possible
    pub band: Option<&'a str>,
    /// Cleaned album title, or the title guessed from a track's file name
    pub title: &'a str,
    /// Audio file used for fingerprinting
    pub sample: &'a Path,
}

impl ArtworkRequest<'_> {
    /// Free-text catalog query: band and title, or the title alone.
    pub fn catalog_query(&self) -> String {
        compose_query(self.band, self.title)
    }
}

/// Prefix `band` onto `text` when a band is known.
pub fn compose_query(band: Option<&str>, text: &str) -> String {
    match band {
        Some(band) => format!("{} {}", band, text),
        None => text.to_string(),
    }
}

/// One album hit from the catalog search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogAlbum {
    pub artist: String,
    pub collection: String,
    /// Low-resolution artwork URL (carries a `100x100` size token)
    pub artwork_url: Option<String>,
}

/// A release enumerated from the MusicBrainz search, probed once and dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRelease {
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    /// Combined artist credit
    pub artist: Option<String>,
}

/// One image listed by the Cover Art Archive for a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveImage {
    pub front: bool,
    /// Full-size image URL
    pub image: Option<String>,
}

/// Audio fingerprint for a track
#[derive(Debug, Clone)]
pub struct AudioFingerprint {
    /// The fingerprint string (Chromaprint format)
    pub fingerprint: String,
    /// Duration of the audio in seconds (required by AcoustID)
    pub duration_secs: u32,
}

/// A ranked fingerprint match, in service order
#[derive(Debug, Clone, PartialEq)]
pub struct FingerprintMatch {
    pub score: f32,
    pub recording_id: String,
    pub title: Option<String>,
    pub artist: Option<String>,
}

impl FingerprintMatch {
    /// `"<artist> <title>"` when both are present and non-blank.
    pub fn search_text(&self) -> Option<String> {
        let artist = self.artist.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let title = self.title.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some(format!("{} {}", artist, title))
    }
}

/// Errors that can occur talking to a remote service
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    #[error("Failed to generate fingerprint: {0}")]
    Fingerprint(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Outcome of one provider operation.
///
/// `NotFound` is a normal answer; `Failed` means the question could not be
/// asked. The pipeline moves on after either, but logs them differently.
#[derive(Debug, Clone)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Failed(LookupError),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Collapse to an option, dropping the failure detail.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound | Self::Failed(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(f(value)),
            Self::NotFound => Lookup::NotFound,
            Self::Failed(e) => Lookup::Failed(e),
        }
    }
}

impl<T> From<Result<Option<T>, LookupError>> for Lookup<T> {
    fn from(result: Result<Option<T>, LookupError>) -> Self {
        match result {
            Ok(Some(value)) => Self::Found(value),
            Ok(None) => Self::NotFound,
            Err(e) => Self::Failed(e),
        }
    }
}
