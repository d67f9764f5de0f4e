//! artwork-embedder - find album cover artwork and embed it into audio tags.
//!
//! Artwork is looked up through a fallback chain (iTunes catalog search,
//! MusicBrainz + Cover Art Archive, AcoustID fingerprinting) and written
//! into every track of an album folder, or into loose tracks one by one.

pub mod artwork;
pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod metadata;
pub mod normalize;
pub mod service;
#[cfg(test)]
pub mod test_utils;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<ExitCode> {
    // ACOUSTID_API_KEY may live in a local .env file
    dotenv::dotenv().ok();

    let args = cli::Cli::parse();

    // Logs go to stderr so progress output on stdout stays readable
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("artwork_embedder=info")),
        )
        .init();

    cli::run_command(&args)
}
