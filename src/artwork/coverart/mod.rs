//! Cover Art Archive integration
//!
//! Lists the images stored for a MusicBrainz release and builds the
//! redirect URL for its front cover. No API key required.

pub mod dto;
mod client;

pub use client::CoverArtClient;
