//! AcoustID API integration
//!
//! AcoustID identifies music by audio fingerprint. We only use it to recover
//! an artist and title for files whose names and tags say too little.
//! API docs: https://acoustid.org/webservice

mod adapter;
mod client;
pub mod dto;

pub use adapter::to_matches;
pub use client::AcoustIdClient;
