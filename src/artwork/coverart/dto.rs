//! Wire types for `GET /release/{mbid}` on the Cover Art Archive.
//!
//! Listings written by older edits leave fields out freely, so every field
//! defaults. Only `front` and `image` feed the domain.
//!
//! Reference: https://wiki.musicbrainz.org/Cover_Art_Archive/API

use serde::{Deserialize, Serialize};

/// Image listing of one release
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoverArtResponse {
    #[serde(default)]
    pub images: Vec<Image>,
    /// MusicBrainz page of the release
    #[serde(default)]
    pub release: String,
}

/// One uploaded image
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    /// Set on the image chosen as the release front
    #[serde(default)]
    pub front: bool,
    #[serde(default)]
    pub back: bool,
    /// "Front", "Back", "Booklet", ...
    #[serde(default)]
    pub types: Vec<String>,
    /// Full-size original
    pub image: Option<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(default)]
    pub approved: bool,
}

/// Thumbnails keyed by pixel width
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Thumbnails {
    #[serde(rename = "250")]
    pub small: Option<String>,
    #[serde(rename = "500")]
    pub large: Option<String>,
    #[serde(rename = "1200")]
    pub xlarge: Option<String>,
}
