//! Consumer-facing entry points
//!
//! One method per use case. Adult-content visibility is an explicit argument
//! wherever the upstream query depends on it.

use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::modules::{
    catalog::GenreCatalog,
    comics::{ComicRecommendations, ComicsAggregator},
    detail::{
        CharacterDetail, ComicDetail, DetailService, MovieDetail, PersonDetail, TvDetail,
    },
    provider::{
        AniListAdapter, CacheStats, CachingCatalogRepository, CachingMediaGraphRepository,
        CatalogRepository, ExternalMetadataCache, MediaGraphRepository, TmdbAdapter,
        UpstreamPayload,
    },
    recommendation::{RecommendationPage, RecommendationRequest, RecommendationResolver},
    search::{BucketPage, SearchAggregator, SearchAllResponse},
};
use crate::shared::{
    application::pagination::PageRequest,
    config::HubConfig,
    domain::value_objects::{Bucket, CatalogFamily},
    errors::{AppError, AppResult},
};

/// How often expired cache entries are swept in the background
const CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

pub struct ContentHub {
    config: HubConfig,
    cache: ExternalMetadataCache<UpstreamPayload>,
    catalog: GenreCatalog,
    recommendations: RecommendationResolver,
    comics: ComicsAggregator,
    search: SearchAggregator,
    details: DetailService,
}

impl ContentHub {
    /// Wire the services over raw upstream repositories
    ///
    /// Both repositories are wrapped in caching decorators sharing one store.
    /// The genre catalog reads the raw catalog through its own snapshot cache.
    pub fn new(
        catalog_repo: Arc<dyn CatalogRepository>,
        graph_repo: Arc<dyn MediaGraphRepository>,
        config: HubConfig,
    ) -> Self {
        let cache = ExternalMetadataCache::from_settings(&config.cache);

        let cached_catalog: Arc<dyn CatalogRepository> = Arc::new(CachingCatalogRepository::new(
            Arc::clone(&catalog_repo),
            cache.clone(),
        ));
        let cached_graph: Arc<dyn MediaGraphRepository> =
            Arc::new(CachingMediaGraphRepository::new(graph_repo, cache.clone()));

        let catalog = GenreCatalog::new(
            catalog_repo,
            &config.locales.genre,
            config.cache.taxonomy_ttl(),
        );

        let recommendations = RecommendationResolver::new(
            Arc::clone(&cached_catalog),
            catalog.clone(),
            &config.locales.fallback,
        );
        let comics = ComicsAggregator::new(
            Arc::clone(&cached_graph),
            config.paging.comics_per_more_page,
        );
        let search = SearchAggregator::new(
            Arc::clone(&cached_catalog),
            Arc::clone(&cached_graph),
            catalog.clone(),
            &config.locales.primary,
            config.paging.clone(),
        );
        let details = DetailService::new(
            cached_catalog,
            cached_graph,
            &config.locales.primary,
            config.paging.characters_per_page,
        );

        Self {
            config,
            cache,
            catalog,
            recommendations,
            comics,
            search,
            details,
        }
    }

    /// Build the real provider clients, warm the genre catalog and start the cache sweeper
    pub async fn bootstrap(config: HubConfig) -> AppResult<Self> {
        if config.endpoints.tmdb_api_token.is_none() {
            return Err(AppError::ConfigurationError(
                "TMDB_API_TOKEN is not set".to_string(),
            ));
        }

        let tmdb: Arc<dyn CatalogRepository> = Arc::new(TmdbAdapter::new(&config.endpoints));
        let anilist: Arc<dyn MediaGraphRepository> =
            Arc::new(AniListAdapter::new(&config.endpoints));

        let hub = Self::new(tmdb, anilist, config);
        hub.catalog.warm().await?;
        hub.cache.spawn_cleanup_task(CACHE_SWEEP_INTERVAL);

        info!(
            "Content hub ready (locale {}, fallback {})",
            hub.config.locales.primary, hub.config.locales.fallback
        );
        Ok(hub)
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn genre_catalog(&self) -> &GenreCatalog {
        &self.catalog
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached upstream payload; in-flight loads are unaffected
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub async fn resolve_tv_detail(&self, id: u64) -> AppResult<TvDetail> {
        self.details.resolve_tv_detail(id).await
    }

    pub async fn resolve_movie_detail(&self, id: u64) -> AppResult<MovieDetail> {
        self.details.resolve_movie_detail(id).await
    }

    pub async fn resolve_comic_detail(
        &self,
        id: u64,
        page: Option<u32>,
        include_adult: bool,
    ) -> AppResult<ComicDetail> {
        self.details
            .resolve_comic_detail(id, PageRequest::new(page), include_adult)
            .await
    }

    pub async fn resolve_character(&self, character_id: u64) -> AppResult<CharacterDetail> {
        self.details.resolve_character(character_id).await
    }

    pub async fn resolve_person(&self, person_id: u64) -> AppResult<PersonDetail> {
        self.details.resolve_person(person_id).await
    }

    pub async fn resolve_tv_recommendations(
        &self,
        id: u64,
        page: Option<u32>,
    ) -> AppResult<RecommendationPage> {
        self.catalog_recommendations(CatalogFamily::Tv, id, page).await
    }

    pub async fn resolve_movie_recommendations(
        &self,
        id: u64,
        page: Option<u32>,
    ) -> AppResult<RecommendationPage> {
        self.catalog_recommendations(CatalogFamily::Movie, id, page)
            .await
    }

    pub async fn resolve_comic_recommendations(
        &self,
        id: u64,
        page: Option<u32>,
        include_adult: bool,
    ) -> AppResult<ComicRecommendations> {
        self.comics
            .resolve(id, PageRequest::new(page), include_adult)
            .await
    }

    pub async fn search_all(
        &self,
        keyword: &str,
        include_adult: bool,
    ) -> AppResult<SearchAllResponse> {
        self.search.search_all(keyword, include_adult).await
    }

    pub async fn search_bucket(
        &self,
        bucket: Bucket,
        keyword: &str,
        page: Option<u32>,
        include_adult: bool,
    ) -> AppResult<BucketPage> {
        self.search
            .search_bucket(bucket, keyword, PageRequest::new(page), include_adult)
            .await
    }

    pub async fn suggest_keywords(
        &self,
        keyword: &str,
        include_adult: bool,
    ) -> AppResult<Vec<String>> {
        self.search.suggest_keywords(keyword, include_adult).await
    }

    async fn catalog_recommendations(
        &self,
        family: CatalogFamily,
        id: u64,
        page: Option<u32>,
    ) -> AppResult<RecommendationPage> {
        let request = RecommendationRequest::new(
            family,
            id,
            PageRequest::new(page).page,
            &self.config.locales.primary,
        );
        self.recommendations.resolve(&request).await
    }
}
