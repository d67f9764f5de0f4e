//! Unit-of-work drivers.
//!
//! For each work unit:
//! 1. Resolve an artwork reference through the provider chain
//! 2. Download it once
//! 3. Embed it into every audio file of the unit
//!
//! Drivers never print. They return report values and the CLI decides how
//! to show them.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::artwork::traits::{ArtworkFetcher, CoverArchiveApi};
use crate::artwork::{
    ArtworkImage, ArtworkReference, ArtworkSource, HttpFetcher, ResolutionPipeline,
};
use crate::config::Config;
use crate::library::{AlbumUnit, TrackUnit, WorkUnit};
use crate::metadata::{self, EmbedOutcome, StripOutcome};

/// Outcome for one file of a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: EmbedOutcome,
}

/// Outcome of stripping one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripReport {
    pub path: PathBuf,
    pub outcome: StripOutcome,
}

/// Outcome for one work unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// The unit holds no audio files
    NoAudio,
    /// Every provider came back empty
    NoArtwork,
    /// A reference was found but the download failed
    DownloadFailed { url: String, reason: String },
    /// Artwork was downloaded; per-file results follow
    Embedded {
        reference: ArtworkReference,
        files: Vec<FileReport>,
    },
}

/// Resolves, downloads and embeds artwork for work units
pub struct ArtworkService {
    pipeline: ResolutionPipeline,
    fetcher: Arc<dyn ArtworkFetcher>,
    archive: Arc<dyn CoverArchiveApi>,
}

impl ArtworkService {
    pub fn new(
        pipeline: ResolutionPipeline,
        fetcher: Arc<dyn ArtworkFetcher>,
        archive: Arc<dyn CoverArchiveApi>,
    ) -> Self {
        Self {
            pipeline,
            fetcher,
            archive,
        }
    }

    /// Wire up the real HTTP clients.
    pub fn from_config(config: &Config, acoustid_api_key: Option<String>) -> Self {
        let (pipeline, archive) = ResolutionPipeline::standard(config, acoustid_api_key);
        Self::new(
            pipeline,
            Arc::new(HttpFetcher::new(&config.providers)),
            archive,
        )
    }

    pub async fn process_album(&self, album: AlbumUnit) -> UnitOutcome {
        self.process(&WorkUnit::Album(album)).await
    }

    pub async fn process_track(&self, track: TrackUnit) -> UnitOutcome {
        self.process(&WorkUnit::Track(track)).await
    }

    /// Resolve, download once, embed into every file of the unit.
    pub async fn process(&self, unit: &WorkUnit) -> UnitOutcome {
        let Some(request) = unit.request() else {
            return UnitOutcome::NoAudio;
        };

        let Some(reference) = self.pipeline.resolve(&request).await else {
            return UnitOutcome::NoArtwork;
        };

        self.download_and_embed(reference, unit.files(), unit.band())
            .await
    }

    /// Embed the front cover of a known release into every track of `album`.
    ///
    /// The archive listing supplies the full-size front image; without one
    /// the 500px front-cover URL is used. The artist is not verified.
    pub async fn embed_release(&self, release_id: &str, album: &AlbumUnit) -> UnitOutcome {
        if album.tracks.is_empty() {
            return UnitOutcome::NoAudio;
        }

        let url = match self.archive.list_images(release_id).await {
            Ok(images) => images
                .into_iter()
                .find(|image| image.front)
                .and_then(|image| image.image),
            Err(e) => {
                warn!("Cover art listing for {} failed: {}", release_id, e);
                None
            }
        }
        .unwrap_or_else(|| self.archive.front_cover_url(release_id));

        let reference = ArtworkReference::new(url, ArtworkSource::ReleaseArchive);
        self.download_and_embed(reference, &album.tracks, None)
            .await
    }

    async fn download_and_embed(
        &self,
        reference: ArtworkReference,
        files: &[PathBuf],
        band: Option<&str>,
    ) -> UnitOutcome {
        let image = match self.fetcher.fetch(&reference.url).await {
            Ok(image) => image,
            Err(e) => {
                warn!("Download of {} failed: {}", reference.url, e);
                return UnitOutcome::DownloadFailed {
                    url: reference.url,
                    reason: e.to_string(),
                };
            }
        };
        info!("Downloaded {} bytes from {}", image.data.len(), reference.url);

        UnitOutcome::Embedded {
            files: embed_all(files, &image, band),
            reference,
        }
    }
}

/// Same image into every file; one failure never stops the rest.
fn embed_all(files: &[PathBuf], image: &ArtworkImage, band: Option<&str>) -> Vec<FileReport> {
    files
        .iter()
        .map(|path| FileReport {
            outcome: metadata::embed_artwork(path, image, band),
            path: path.clone(),
        })
        .collect()
}

/// Strip artwork from every track of an album.
pub fn clean_album(album: &AlbumUnit) -> Vec<StripReport> {
    album
        .tracks
        .iter()
        .map(|path| StripReport {
            outcome: metadata::strip_artwork(path),
            path: path.clone(),
        })
        .collect()
}
