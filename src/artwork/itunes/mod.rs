//! iTunes catalog search integration
//!
//! Free-text album search against the iTunes Search API. No API key required.
//! API docs: https://performance-partners.apple.com/search-api

mod adapter;
mod client;
pub mod dto;

pub use adapter::{select_album, to_albums, upscale_artwork_url};
pub use client::ItunesClient;
