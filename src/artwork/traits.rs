//! Trait definitions for external services and artwork providers.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! substitute the mocks at the bottom of this file.
//!
//! # Example
//!
//! ```ignore
//! use artwork_embedder::artwork::traits::CatalogApi;
//!
//! async fn first_album(client: &dyn CatalogApi) -> Option<CatalogAlbum> {
//!     client.search_albums("Cosmonkey Rainy").await.ok()?.into_iter().next()
//! }
//! ```

use std::path::Path;

use async_trait::async_trait;

use super::domain::{
    ArchiveImage, ArtworkImage, ArtworkReference, ArtworkRequest, AudioFingerprint,
    CandidateRelease, CatalogAlbum, FingerprintMatch, Lookup, LookupError,
};

/// Free-text album search against the commercial catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn search_albums(&self, term: &str) -> Result<Vec<CatalogAlbum>, LookupError>;
}

/// Release search against the structured metadata database.
#[async_trait]
pub trait ReleaseSearchApi: Send + Sync {
    /// Candidate releases in server order.
    async fn search_releases(
        &self,
        band: &str,
        title: &str,
    ) -> Result<Vec<CandidateRelease>, LookupError>;
}

/// Artwork archive keyed by release identifier.
#[async_trait]
pub trait CoverArchiveApi: Send + Sync {
    /// Images stored for a release; empty when the archive has none.
    async fn list_images(&self, release_id: &str) -> Result<Vec<ArchiveImage>, LookupError>;

    /// Download URL for the front cover of a release.
    fn front_cover_url(&self, release_id: &str) -> String;
}

/// Fingerprint matching service.
#[async_trait]
pub trait AcoustIdApi: Send + Sync {
    async fn lookup(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<Vec<FingerprintMatch>, LookupError>;
}

/// Computes acoustic fingerprints of local files.
pub trait Fingerprinter: Send + Sync {
    fn fingerprint(&self, path: &Path) -> Result<AudioFingerprint, LookupError>;
}

/// One link of the resolution chain.
///
/// Every provider answers the same question for a work unit; the pipeline
/// only cares whether the answer is `Found`.
#[async_trait]
pub trait ArtworkProvider: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    async fn resolve(&self, request: &ArtworkRequest<'_>) -> Lookup<ArtworkReference>;
}

/// Downloads artwork bytes.
#[async_trait]
pub trait ArtworkFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ArtworkImage, LookupError>;
}

// Implement traits for real clients

#[async_trait]
impl CatalogApi for super::itunes::ItunesClient {
    async fn search_albums(&self, term: &str) -> Result<Vec<CatalogAlbum>, LookupError> {
        self.search_albums(term).await
    }
}

#[async_trait]
impl ReleaseSearchApi for super::musicbrainz::MusicBrainzClient {
    async fn search_releases(
        &self,
        band: &str,
        title: &str,
    ) -> Result<Vec<CandidateRelease>, LookupError> {
        self.search_releases(band, title).await
    }
}

#[async_trait]
impl CoverArchiveApi for super::coverart::CoverArtClient {
    async fn list_images(&self, release_id: &str) -> Result<Vec<ArchiveImage>, LookupError> {
        self.list_images(release_id).await
    }

    fn front_cover_url(&self, release_id: &str) -> String {
        self.front_cover_url(release_id)
    }
}

#[async_trait]
impl AcoustIdApi for super::acoustid::AcoustIdClient {
    async fn lookup(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<Vec<FingerprintMatch>, LookupError> {
        self.lookup(fingerprint).await
    }
}

/// Mock implementations for testing.
///
/// Every mock counts its calls so tests can assert which services a run
/// actually touched.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock catalog returning a fixed album list.
    pub struct MockCatalog {
        pub albums: Vec<CatalogAlbum>,
        pub error: Option<LookupError>,
        calls: AtomicUsize,
        queries: Mutex<Vec<String>>,
    }

    impl MockCatalog {
        pub fn returning(albums: Vec<CatalogAlbum>) -> Self {
            Self {
                albums,
                error: None,
                calls: AtomicUsize::new(0),
                queries: Mutex::new(Vec::new()),
            }
        }

        pub fn empty() -> Self {
            Self::returning(vec![])
        }

        pub fn with_error(error: LookupError) -> Self {
            Self {
                error: Some(error),
                ..Self::empty()
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    /// Album fixture with a thumbnail-sized artwork URL.
    pub fn album(artist: &str, collection: &str) -> CatalogAlbum {
        CatalogAlbum {
            artist: artist.to_string(),
            collection: collection.to_string(),
            artwork_url: Some(format!(
                "https://is1-ssl.mzstatic.com/{}/100x100bb.jpg",
                collection.replace(' ', "_")
            )),
        }
    }

    #[async_trait]
    impl CatalogApi for MockCatalog {
        async fn search_albums(&self, term: &str) -> Result<Vec<CatalogAlbum>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(term.to_string());
            if let Some(ref err) = self.error {
                return Err(err.clone());
            }
            Ok(self.albums.clone())
        }
    }

    /// Mock release database.
    pub struct MockReleases {
        pub releases: Vec<CandidateRelease>,
        pub error: Option<LookupError>,
        calls: AtomicUsize,
    }

    impl MockReleases {
        /// Releases with the given ids, in that order.
        pub fn with_ids(ids: &[&str]) -> Self {
            Self {
                releases: ids
                    .iter()
                    .map(|id| CandidateRelease {
                        id: id.to_string(),
                        title: "Rainy".to_string(),
                        date: None,
                        artist: Some("Cosmonkey".to_string()),
                    })
                    .collect(),
                error: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_error(error: LookupError) -> Self {
            Self {
                error: Some(error),
                ..Self::with_ids(&[])
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReleaseSearchApi for MockReleases {
        async fn search_releases(
            &self,
            _band: &str,
            _title: &str,
        ) -> Result<Vec<CandidateRelease>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(ref err) = self.error {
                return Err(err.clone());
            }
            Ok(self.releases.clone())
        }
    }

    /// Mock artwork archive.
    ///
    /// Releases listed in `fronts` have a front image; releases in `failing`
    /// answer with a network error; everything else has no images.
    pub struct MockArchive {
        pub fronts: HashSet<String>,
        pub failing: HashSet<String>,
        pub full_size_url: Option<String>,
        probes: Mutex<Vec<String>>,
    }

    impl MockArchive {
        pub fn with_fronts(ids: &[&str]) -> Self {
            Self {
                fronts: ids.iter().map(|id| id.to_string()).collect(),
                failing: HashSet::new(),
                full_size_url: None,
                probes: Mutex::new(Vec::new()),
            }
        }

        pub fn failing_on(mut self, ids: &[&str]) -> Self {
            self.failing = ids.iter().map(|id| id.to_string()).collect();
            self
        }

        /// Full-size URL reported for front images.
        pub fn with_full_size_url(mut self, url: &str) -> Self {
            self.full_size_url = Some(url.to_string());
            self
        }

        pub fn probes(&self) -> Vec<String> {
            self.probes.lock().unwrap().clone()
        }

        pub fn probe_count(&self) -> usize {
            self.probes.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CoverArchiveApi for MockArchive {
        async fn list_images(&self, release_id: &str) -> Result<Vec<ArchiveImage>, LookupError> {
            self.probes.lock().unwrap().push(release_id.to_string());
            if self.failing.contains(release_id) {
                return Err(LookupError::Network("connection reset".to_string()));
            }
            let mut images = vec![ArchiveImage {
                front: false,
                image: Some(format!("https://archive.test/{}/back.jpg", release_id)),
            }];
            if self.fronts.contains(release_id) {
                images.push(ArchiveImage {
                    front: true,
                    image: self.full_size_url.clone(),
                });
            }
            Ok(images)
        }

        fn front_cover_url(&self, release_id: &str) -> String {
            format!("https://archive.test/release/{}/front-500", release_id)
        }
    }

    /// Mock fingerprint service.
    pub struct MockAcoustId {
        pub matches: Vec<FingerprintMatch>,
        pub error: Option<LookupError>,
        calls: AtomicUsize,
    }

    impl MockAcoustId {
        pub fn no_matches() -> Self {
            Self {
                matches: vec![],
                error: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn returning(matches: Vec<FingerprintMatch>) -> Self {
            Self {
                matches,
                ..Self::no_matches()
            }
        }

        /// A single match with both artist and title.
        pub fn single_match(artist: &str, title: &str) -> Self {
            Self::returning(vec![fingerprint_match(Some(artist), Some(title))])
        }

        pub fn with_error(error: LookupError) -> Self {
            Self {
                error: Some(error),
                ..Self::no_matches()
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    pub fn fingerprint_match(artist: Option<&str>, title: Option<&str>) -> FingerprintMatch {
        FingerprintMatch {
            score: 0.9,
            recording_id: "mock-recording-id".to_string(),
            title: title.map(String::from),
            artist: artist.map(String::from),
        }
    }

    #[async_trait]
    impl AcoustIdApi for MockAcoustId {
        async fn lookup(
            &self,
            _fingerprint: &AudioFingerprint,
        ) -> Result<Vec<FingerprintMatch>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(ref err) = self.error {
                return Err(err.clone());
            }
            Ok(self.matches.clone())
        }
    }

    /// Fingerprinter that never touches the file.
    pub struct MockFingerprinter {
        pub error: Option<LookupError>,
        calls: AtomicUsize,
    }

    impl MockFingerprinter {
        pub fn working() -> Self {
            Self {
                error: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_error(error: LookupError) -> Self {
            Self {
                error: Some(error),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Fingerprinter for MockFingerprinter {
        fn fingerprint(&self, _path: &Path) -> Result<AudioFingerprint, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(ref err) = self.error {
                return Err(err.clone());
            }
            Ok(AudioFingerprint {
                fingerprint: "AQADtNIyRUkkZUqS".to_string(),
                duration_secs: 180,
            })
        }
    }

    /// Provider with a canned answer.
    pub struct MockProvider {
        pub label: &'static str,
        pub outcome: Lookup<ArtworkReference>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        pub fn new(label: &'static str, outcome: Lookup<ArtworkReference>) -> Self {
            Self {
                label,
                outcome,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ArtworkProvider for MockProvider {
        fn name(&self) -> &'static str {
            self.label
        }

        async fn resolve(&self, _request: &ArtworkRequest<'_>) -> Lookup<ArtworkReference> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    /// Fetcher serving fixed bytes, or failing when it has none.
    pub struct MockFetcher {
        pub image: Option<ArtworkImage>,
        urls: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        pub fn serving(data: Vec<u8>) -> Self {
            Self {
                image: Some(ArtworkImage {
                    data,
                    mime_type: "image/jpeg".to_string(),
                }),
                urls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                image: None,
                urls: Mutex::new(Vec::new()),
            }
        }

        pub fn urls(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }

        pub fn fetch_count(&self) -> usize {
            self.urls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ArtworkFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<ArtworkImage, LookupError> {
            self.urls.lock().unwrap().push(url.to_string());
            self.image
                .clone()
                .ok_or_else(|| LookupError::Network("HTTP 404 Not Found: Not Found".to_string()))
        }
    }
}
