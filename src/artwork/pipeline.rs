//! Ordered fallback chain over the artwork providers.

use std::sync::Arc;

use tracing::{info, warn};

use super::coverart::CoverArtClient;
use super::domain::{ArtworkReference, ArtworkRequest, Lookup};
use super::itunes::ItunesClient;
use super::musicbrainz::MusicBrainzClient;
use super::providers::{CatalogSearch, FingerprintFallback, FingerprintIdentifier, ReleaseArchive};
use super::traits::{ArtworkProvider, CoverArchiveApi};
use crate::config::Config;

/// Tries each provider in order and keeps the first reference found.
pub struct ResolutionPipeline {
    providers: Vec<Box<dyn ArtworkProvider>>,
}

impl ResolutionPipeline {
    pub fn new(providers: Vec<Box<dyn ArtworkProvider>>) -> Self {
        Self { providers }
    }

    /// Catalog search, then release database + archive, then fingerprint.
    ///
    /// Returns the pipeline together with the archive client so the direct
    /// release mode can share it.
    pub fn standard(
        config: &Config,
        acoustid_api_key: Option<String>,
    ) -> (Self, Arc<dyn CoverArchiveApi>) {
        let providers_config = &config.providers;

        let catalog = CatalogSearch::new(
            Arc::new(ItunesClient::new(providers_config)),
            providers_config.catalog_artwork_size.clone(),
        );
        let archive: Arc<dyn CoverArchiveApi> = Arc::new(CoverArtClient::new(providers_config));
        let releases = ReleaseArchive::new(
            Arc::new(MusicBrainzClient::new(providers_config)),
            archive.clone(),
        );
        let fingerprint = FingerprintFallback::new(
            FingerprintIdentifier::new(acoustid_api_key, providers_config),
            catalog.clone(),
        );

        let pipeline = Self::new(vec![
            Box::new(catalog),
            Box::new(releases),
            Box::new(fingerprint),
        ]);
        (pipeline, archive)
    }

    /// First `Found` wins; later providers are not consulted.
    pub async fn resolve(&self, request: &ArtworkRequest<'_>) -> Option<ArtworkReference> {
        for provider in &self.providers {
            match provider.resolve(request).await {
                Lookup::Found(reference) => {
                    info!("{}: artwork found via {}", request.title, reference.source);
                    return Some(reference);
                }
                Lookup::NotFound => {
                    info!("{}: nothing from {}", request.title, provider.name());
                }
                Lookup::Failed(e) => {
                    warn!("{}: {} lookup failed: {}", request.title, provider.name(), e);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artwork::domain::{ArtworkSource, LookupError};
    use crate::artwork::traits::mocks::MockProvider;
    use std::path::Path;

    /// Test-side handle on a provider owned by the pipeline
    struct Shared(Arc<MockProvider>);

    #[async_trait::async_trait]
    impl ArtworkProvider for Shared {
        fn name(&self) -> &'static str {
            self.0.name()
        }

        async fn resolve(&self, request: &ArtworkRequest<'_>) -> Lookup<ArtworkReference> {
            self.0.resolve(request).await
        }
    }

    fn pipeline_of(providers: &[Arc<MockProvider>]) -> ResolutionPipeline {
        ResolutionPipeline::new(
            providers
                .iter()
                .map(|p| Box::new(Shared(p.clone())) as Box<dyn ArtworkProvider>)
                .collect(),
        )
    }

    fn request() -> ArtworkRequest<'static> {
        ArtworkRequest {
            band: Some("Cosmonkey"),
            title: "Rainy",
            sample: Path::new("01 Rainy.mp3"),
        }
    }

    fn found(url: &str, source: ArtworkSource) -> Lookup<ArtworkReference> {
        Lookup::Found(ArtworkReference::new(url, source))
    }

    #[tokio::test]
    async fn test_first_hit_short_circuits() {
        let providers = [
            Arc::new(MockProvider::new("catalog", found("https://a/1.jpg", ArtworkSource::Catalog))),
            Arc::new(MockProvider::new(
                "releases",
                found("https://b/1.jpg", ArtworkSource::ReleaseArchive),
            )),
            Arc::new(MockProvider::new("fingerprint", Lookup::NotFound)),
        ];

        let reference = pipeline_of(&providers).resolve(&request()).await;

        assert_eq!(reference.map(|r| r.url), Some("https://a/1.jpg".to_string()));
        assert_eq!(providers[0].call_count(), 1);
        assert_eq!(providers[1].call_count(), 0);
        assert_eq!(providers[2].call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_moves_to_next_provider() {
        let providers = [
            Arc::new(MockProvider::new(
                "catalog",
                Lookup::Failed(LookupError::Network("timeout".to_string())),
            )),
            Arc::new(MockProvider::new("releases", Lookup::NotFound)),
            Arc::new(MockProvider::new(
                "fingerprint",
                found("https://c/1.jpg", ArtworkSource::Fingerprint),
            )),
        ];

        let reference = pipeline_of(&providers).resolve(&request()).await;

        assert_eq!(
            reference.map(|r| r.source),
            Some(ArtworkSource::Fingerprint)
        );
        assert!(providers.iter().all(|p| p.call_count() == 1));
    }

    #[tokio::test]
    async fn test_all_absent_is_none() {
        let providers = [
            Arc::new(MockProvider::new("catalog", Lookup::NotFound)),
            Arc::new(MockProvider::new("releases", Lookup::NotFound)),
        ];

        assert!(pipeline_of(&providers).resolve(&request()).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_pipeline_is_none() {
        let pipeline = ResolutionPipeline::new(vec![]);
        assert!(pipeline.resolve(&request()).await.is_none());
    }
}
