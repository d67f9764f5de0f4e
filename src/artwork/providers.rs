//! The three artwork providers.
//!
//! Each turns a work unit into at most one [`ArtworkReference`]. Transport
//! and parse failures stop at this boundary as [`Lookup::Failed`]; nothing
//! here returns an error to the caller.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::acoustid::AcoustIdClient;
use super::domain::{
    ArtworkReference, ArtworkRequest, ArtworkSource, Lookup, LookupError, compose_query,
};
use super::fingerprint::Fpcalc;
use super::itunes::{select_album, upscale_artwork_url};
use super::traits::{
    AcoustIdApi, ArtworkProvider, CatalogApi, CoverArchiveApi, Fingerprinter, ReleaseSearchApi,
};
use crate::config::ProvidersConfig;

/// Catalog search: free-text query filtered by expected artist.
#[derive(Clone)]
pub struct CatalogSearch {
    client: Arc<dyn CatalogApi>,
    artwork_size: String,
}

impl CatalogSearch {
    pub fn new(client: Arc<dyn CatalogApi>, artwork_size: impl Into<String>) -> Self {
        Self {
            client,
            artwork_size: artwork_size.into(),
        }
    }

    /// Search the catalog and return an upscaled artwork URL.
    ///
    /// With `expected_artist`, only an album whose artist contains it
    /// (case-insensitive) is accepted. Without it the first album wins.
    pub async fn search(
        &self,
        query: &str,
        expected_artist: Option<&str>,
    ) -> Lookup<ArtworkReference> {
        debug!("Catalog query: {:?} (artist: {:?})", query, expected_artist);

        let albums = match self.client.search_albums(query).await {
            Ok(albums) => albums,
            Err(e) => return Lookup::Failed(e),
        };

        let Some(album) = select_album(&albums, expected_artist) else {
            debug!("No catalog album among {} results", albums.len());
            return Lookup::NotFound;
        };

        match album.artwork_url.as_deref() {
            Some(url) => {
                debug!("Catalog hit: {} - {}", album.artist, album.collection);
                Lookup::Found(ArtworkReference::new(
                    upscale_artwork_url(url, &self.artwork_size),
                    ArtworkSource::Catalog,
                ))
            }
            None => Lookup::NotFound,
        }
    }
}

#[async_trait]
impl ArtworkProvider for CatalogSearch {
    fn name(&self) -> &'static str {
        "iTunes"
    }

    async fn resolve(&self, request: &ArtworkRequest<'_>) -> Lookup<ArtworkReference> {
        self.search(&request.catalog_query(), request.band).await
    }
}

/// Release database search, probed release by release against the archive.
pub struct ReleaseArchive {
    releases: Arc<dyn ReleaseSearchApi>,
    archive: Arc<dyn CoverArchiveApi>,
}

impl ReleaseArchive {
    pub fn new(releases: Arc<dyn ReleaseSearchApi>, archive: Arc<dyn CoverArchiveApi>) -> Self {
        Self { releases, archive }
    }

    /// Front cover of the first candidate release (server order) that has one.
    ///
    /// Remaining candidates are not probed once a front image is found. A
    /// failed probe only skips its own candidate; the search is `Failed`
    /// only when every probe failed.
    pub async fn search(&self, band: Option<&str>, title: &str) -> Lookup<ArtworkReference> {
        let Some(band) = band else {
            debug!("Release search skipped: no band to match {:?}", title);
            return Lookup::NotFound;
        };

        let candidates = match self.releases.search_releases(band, title).await {
            Ok(candidates) => candidates,
            Err(e) => return Lookup::Failed(e),
        };
        debug!("{} candidate releases for {} - {}", candidates.len(), band, title);

        let mut last_error: Option<LookupError> = None;
        let mut answered = false;

        for candidate in &candidates {
            match self.archive.list_images(&candidate.id).await {
                Ok(images) if images.iter().any(|image| image.front) => {
                    debug!("Front cover on release {} ({})", candidate.id, candidate.title);
                    return Lookup::Found(ArtworkReference::new(
                        self.archive.front_cover_url(&candidate.id),
                        ArtworkSource::ReleaseArchive,
                    ));
                }
                Ok(_) => {
                    answered = true;
                    debug!("No front cover on release {}", candidate.id);
                }
                Err(e) => {
                    warn!("Archive probe for release {} failed: {}", candidate.id, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if !answered => Lookup::Failed(e),
            _ => Lookup::NotFound,
        }
    }
}

#[async_trait]
impl ArtworkProvider for ReleaseArchive {
    fn name(&self) -> &'static str {
        "MusicBrainz"
    }

    async fn resolve(&self, request: &ArtworkRequest<'_>) -> Lookup<ArtworkReference> {
        self.search(request.band, request.title).await
    }
}

/// Recovers "artist title" text for a file from its audio fingerprint.
pub struct FingerprintIdentifier {
    fingerprinter: Arc<dyn Fingerprinter>,
    /// `None` when no API key was configured
    service: Option<Arc<dyn AcoustIdApi>>,
}

impl FingerprintIdentifier {
    /// Build the identifier from an optional API key.
    ///
    /// Without a key every identification is `NotFound`; this is logged
    /// here, once, instead of on every unit.
    pub fn new(api_key: Option<String>, config: &ProvidersConfig) -> Self {
        let service: Option<Arc<dyn AcoustIdApi>> = match api_key {
            Some(key) => Some(Arc::new(AcoustIdClient::new(key, config))),
            None => {
                warn!("No AcoustID API key configured; fingerprint lookups are disabled");
                None
            }
        };

        Self {
            fingerprinter: Arc::new(Fpcalc),
            service,
        }
    }

    pub fn with_parts(
        fingerprinter: Arc<dyn Fingerprinter>,
        service: Option<Arc<dyn AcoustIdApi>>,
    ) -> Self {
        Self {
            fingerprinter,
            service,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.service.is_some()
    }

    /// First match (service order) carrying both artist and title.
    pub async fn identify(&self, sample: &Path) -> Lookup<String> {
        let Some(service) = self.service.as_ref() else {
            return Lookup::NotFound;
        };

        let fingerprint = match self.fingerprinter.fingerprint(sample) {
            Ok(fp) => fp,
            Err(e) => return Lookup::Failed(e),
        };

        match service.lookup(&fingerprint).await {
            Ok(matches) => {
                match matches.iter().find_map(|m| m.search_text()) {
                    Some(text) => {
                        info!("Fingerprint identified {} as {:?}", sample.display(), text);
                        Lookup::Found(text)
                    }
                    None => Lookup::NotFound,
                }
            }
            Err(e) => Lookup::Failed(e),
        }
    }
}

/// Fingerprint identification fed back into the catalog search.
pub struct FingerprintFallback {
    identifier: FingerprintIdentifier,
    catalog: CatalogSearch,
}

impl FingerprintFallback {
    pub fn new(identifier: FingerprintIdentifier, catalog: CatalogSearch) -> Self {
        Self {
            identifier,
            catalog,
        }
    }
}

#[async_trait]
impl ArtworkProvider for FingerprintFallback {
    fn name(&self) -> &'static str {
        "AcoustID"
    }

    async fn resolve(&self, request: &ArtworkRequest<'_>) -> Lookup<ArtworkReference> {
        let text = match self.identifier.identify(request.sample).await {
            Lookup::Found(text) => text,
            Lookup::NotFound => return Lookup::NotFound,
            Lookup::Failed(e) => return Lookup::Failed(e),
        };

        let query = compose_query(request.band, &text);
        self.catalog
            .search(&query, request.band)
            .await
            .map(|reference| ArtworkReference::new(reference.url, ArtworkSource::Fingerprint))
    }
}
