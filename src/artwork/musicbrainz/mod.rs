//! MusicBrainz API integration
//!
//! Release search by artist + title. The releases found here are the
//! candidates probed against the Cover Art Archive.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API/Search

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_candidates;
pub use client::{MusicBrainzClient, release_query};
