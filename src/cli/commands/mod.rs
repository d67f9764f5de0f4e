//! CLI flag definitions and dispatch.
//!
//! Each mode is implemented in its own submodule:
//! - `embed`: album folders, loose files and direct release ids
//! - `clean`: artwork removal from a named album

mod clean;
mod embed;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tokio::runtime::{Builder, Runtime};

use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::metadata::{EmbedOutcome, StripOutcome};
use crate::service::{ArtworkService, FileReport, StripReport, UnitOutcome};

pub use clean::cmd_clean;
pub use embed::{cmd_files, cmd_folders, cmd_release};

/// Find album artwork and embed it into audio file tags
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root of the music library
    #[arg(long, value_name = "PATH")]
    pub music_folder: PathBuf,

    /// Band name, used in queries and to verify existing artwork
    #[arg(long)]
    pub band: Option<String>,

    /// Only process the album folder with this (normalised) name
    #[arg(long)]
    pub album: Option<String>,

    /// Remove embedded artwork from the named album
    #[arg(long, value_name = "ALBUM")]
    pub clean_album: Option<String>,

    /// Embed the front cover of a MusicBrainz release (requires --album)
    #[arg(long, value_name = "RELEASE_ID")]
    pub brainz: Option<String>,

    /// Treat each sub-folder as an album
    #[arg(long, conflicts_with = "files")]
    pub folders: bool,

    /// Treat each top-level audio file as its own unit
    #[arg(long)]
    pub files: bool,

    /// AcoustID API key (or set ACOUSTID_API_KEY env var)
    #[arg(long, env = "ACOUSTID_API_KEY", hide_env_values = true)]
    pub acoustid_key: Option<String>,

    /// Config file (default: <config dir>/artwork-embedder/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// What a run does, decided once from the flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkMode {
    Folders {
        band: String,
        album_filter: Option<String>,
    },
    Files {
        band: Option<String>,
    },
    CleanAlbum {
        album: String,
    },
    DirectReleaseId {
        release_id: String,
        album: String,
    },
}

impl WorkMode {
    /// Validate the flag combination.
    ///
    /// Precedence: `--brainz`, `--clean-album`, `--files`, `--folders`.
    /// Blank values count as absent.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let band = non_blank(cli.band.as_deref());
        let album = non_blank(cli.album.as_deref());

        if let Some(release_id) = non_blank(cli.brainz.as_deref()) {
            let album = album.ok_or_else(|| {
                Error::usage("--brainz needs --album to locate the album folder")
            })?;
            return Ok(Self::DirectReleaseId { release_id, album });
        }

        if let Some(album) = non_blank(cli.clean_album.as_deref()) {
            return Ok(Self::CleanAlbum { album });
        }

        if cli.files {
            return Ok(Self::Files { band });
        }

        if cli.folders {
            let band = band.ok_or_else(|| Error::usage("--folders needs --band"))?;
            return Ok(Self::Folders {
                band,
                album_filter: album,
            });
        }

        Err(Error::usage(
            "choose one of --folders, --files, --clean-album or --brainz",
        ))
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Run the mode selected by the flags.
///
/// Only flag validation yields a failing exit code; lookup and tag failures
/// are reported per unit and the run carries on.
pub fn run_command(cli: &Cli) -> anyhow::Result<ExitCode> {
    let mode = match WorkMode::from_cli(cli) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run with --help for usage.");
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };
    let root = cli.music_folder.as_path();

    match mode {
        WorkMode::CleanAlbum { album } => cmd_clean(root, &album, &config)?,
        WorkMode::Folders { band, album_filter } => {
            let (rt, service) = online(cli, &config)?;
            cmd_folders(&rt, &service, root, &band, album_filter.as_deref(), &config)?;
        }
        WorkMode::Files { band } => {
            let (rt, service) = online(cli, &config)?;
            cmd_files(&rt, &service, root, band.as_deref(), &config)?;
        }
        WorkMode::DirectReleaseId { release_id, album } => {
            let (rt, service) = online(cli, &config)?;
            cmd_release(&rt, &service, root, &release_id, &album, &config)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Runtime and service for the modes that go to the network.
fn online(cli: &Cli, config: &Config) -> anyhow::Result<(Runtime, ArtworkService)> {
    let rt = Builder::new_current_thread().enable_all().build()?;
    let api_key = config.acoustid_api_key(cli.acoustid_key.as_deref());
    Ok((rt, ArtworkService::from_config(config, api_key)))
}

// ============================================================================
// Shared output helpers
// ============================================================================

/// Running totals for the closing summary line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tally {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
    pub without_artwork: usize,
}

impl Tally {
    fn record_file(&mut self, outcome: &EmbedOutcome) {
        match outcome {
            EmbedOutcome::Written(_) | EmbedOutcome::Replaced(_) => self.written += 1,
            EmbedOutcome::Skipped => self.skipped += 1,
            EmbedOutcome::Failed(_) => self.failed += 1,
        }
    }

    fn print(&self) {
        println!();
        println!(
            "Done: {} written, {} skipped, {} failed, {} without artwork",
            self.written, self.skipped, self.failed, self.without_artwork
        );
    }
}

/// Print one unit's outcome and add it to `tally`.
pub(crate) fn print_unit(label: &str, outcome: &UnitOutcome, tally: &mut Tally) {
    println!("{}", label);
    match outcome {
        UnitOutcome::NoAudio => println!("  - No audio files"),
        UnitOutcome::NoArtwork => {
            tally.without_artwork += 1;
            println!("  ✗ No artwork found");
        }
        UnitOutcome::DownloadFailed { url, reason } => {
            tally.without_artwork += 1;
            println!("  ✗ Download failed: {} ({})", url, reason);
        }
        UnitOutcome::Embedded { reference, files } => {
            println!("  Artwork from {}", reference.source);
            for report in files {
                tally.record_file(&report.outcome);
                print_file(report);
            }
        }
    }
}

fn print_file(report: &FileReport) {
    let name = file_name(&report.path);
    match &report.outcome {
        EmbedOutcome::Written(encoder) => println!("  ✓ {}: artwork written ({})", name, encoder),
        EmbedOutcome::Replaced(encoder) => {
            println!("  ✓ {}: replaced another artist's artwork ({})", name, encoder)
        }
        EmbedOutcome::Skipped => println!("  - {}: already has artwork", name),
        EmbedOutcome::Failed(message) => println!("  ✗ {}: {}", name, message),
    }
}

pub(crate) fn print_strip(report: &StripReport) {
    let name = file_name(&report.path);
    match &report.outcome {
        StripOutcome::Removed(0) => println!("  - {}: no artwork", name),
        StripOutcome::Removed(count) => println!("  ✓ {}: removed {} picture(s)", name, count),
        StripOutcome::NoTag => println!("  - {}: no tag", name),
        StripOutcome::Failed(message) => println!("  ✗ {}: {}", name, message),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
