use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join;
use log::{info, warn};

use crate::modules::catalog::domain::entities::GenreTaxonomy;
use crate::modules::provider::{CacheKey, CatalogRepository, ExternalMetadataCache, Loaded};
use crate::shared::{
    domain::value_objects::{CatalogFamily, Provider},
    errors::{AppError, AppResult, UpstreamError},
};

/// Cached genre taxonomies for the TV and movie families
///
/// Snapshots live in their own small cache with the taxonomy TTL. A failed
/// fetch is never stored and never replaced by a guessed mapping.
#[derive(Clone)]
pub struct GenreCatalog {
    repository: Arc<dyn CatalogRepository>,
    snapshots: ExternalMetadataCache<Arc<GenreTaxonomy>>,
    locale: String,
    ttl: Duration,
}

impl GenreCatalog {
    pub fn new(repository: Arc<dyn CatalogRepository>, locale: &str, ttl: Duration) -> Self {
        Self {
            repository,
            snapshots: ExternalMetadataCache::new(ttl, ttl, CatalogFamily::ALL.len()),
            locale: locale.to_string(),
            ttl,
        }
    }

    /// Current snapshot for `family`, fetching it when absent or expired
    pub async fn get_taxonomy(&self, family: CatalogFamily) -> AppResult<Arc<GenreTaxonomy>> {
        let key = CacheKey::new(Provider::Tmdb, "genres")
            .locale(&self.locale)
            .entity(family);
        let repository = Arc::clone(&self.repository);
        let locale = self.locale.clone();

        self.snapshots
            .fetch_with_ttl(key, self.ttl, move || async move {
                let loaded = match repository.genres(family, &locale).await {
                    Ok(genres) if genres.is_empty() => Err(UpstreamError::decode(
                        Provider::Tmdb,
                        format!("empty {} genre list", family),
                    )),
                    Ok(genres) => Ok(Arc::new(GenreTaxonomy::from_genres(family, &genres))),
                    Err(e) => Err(e),
                };
                // Taxonomy failures must reach the caller every time
                match loaded {
                    Ok(taxonomy) => Loaded::Fresh(taxonomy),
                    Err(e) => Loaded::Uncached(Err(e)),
                }
            })
            .await
            .map_err(|source| {
                warn!("TMDB: {} genre taxonomy unavailable: {}", family, source);
                AppError::TaxonomyUnavailable { family, source }
            })
    }

    /// Both snapshots, fetched concurrently
    pub async fn taxonomies(&self) -> AppResult<(Arc<GenreTaxonomy>, Arc<GenreTaxonomy>)> {
        try_join(
            self.get_taxonomy(CatalogFamily::Tv),
            self.get_taxonomy(CatalogFamily::Movie),
        )
        .await
    }

    /// Fetch both families up front so the first request skips the round trip
    pub async fn warm(&self) -> AppResult<()> {
        let (tv, movie) = self.taxonomies().await?;
        info!(
            "Genre catalog warmed: {} TV genres, {} movie genres",
            tv.len(),
            movie.len()
        );
        Ok(())
    }
}
