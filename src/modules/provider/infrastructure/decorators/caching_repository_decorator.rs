use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::provider::{
    domain::{
        entities::UpstreamPayload,
        repositories::{CatalogRepository, ComicQuery, ComicSearch, MediaGraphRepository},
    },
    infrastructure::{
        adapters::{
            anilist::models::{Character, Media, MediaPage},
            tmdb::models::{
                TmdbGenre, TmdbMovieDetail, TmdbPage, TmdbPersonDetail, TmdbTvDetail,
                TmdbWatchProviders,
            },
        },
        cache::{CacheKey, ExternalMetadataCache, Loaded},
    },
};
use crate::shared::{
    domain::value_objects::{CatalogFamily, Provider},
    errors::UpstreamResult,
};

/// Pull the expected variant out of a cached payload
macro_rules! expect_payload {
    ($payload:expr, $variant:ident) => {
        match $payload {
            UpstreamPayload::$variant(inner) => Ok(inner),
            other => Err(other.mismatch(stringify!($variant))),
        }
    };
}

/// Decorator that fronts every catalog call with the metadata cache
///
/// Successful payloads are cached with the default TTL, confirmed not-found
/// with the negative TTL; every other failure passes through uncached.
pub struct CachingCatalogRepository {
    inner: Arc<dyn CatalogRepository>,
    cache: ExternalMetadataCache<UpstreamPayload>,
}

impl CachingCatalogRepository {
    pub fn new(
        inner: Arc<dyn CatalogRepository>,
        cache: ExternalMetadataCache<UpstreamPayload>,
    ) -> Self {
        Self { inner, cache }
    }

    fn key(operation: &'static str) -> CacheKey {
        CacheKey::new(Provider::Tmdb, operation)
    }
}

#[async_trait]
impl CatalogRepository for CachingCatalogRepository {
    /// Passed through uncached: `GenreCatalog` keeps its own snapshots and
    /// must never see a cached taxonomy failure
    async fn genres(&self, family: CatalogFamily, locale: &str) -> UpstreamResult<Vec<TmdbGenre>> {
        self.inner.genres(family, locale).await
    }

    async fn recommendations(
        &self,
        family: CatalogFamily,
        id: u64,
        page: u32,
        locale: &str,
    ) -> UpstreamResult<TmdbPage> {
        let key = Self::key("recommendations")
            .locale(locale)
            .page(page)
            .entity(format!("{}/{}", family, id));
        let inner = Arc::clone(&self.inner);
        let locale = locale.to_string();

        let payload = self
            .cache
            .fetch(key, move || async move {
                Loaded::from(
                    inner
                        .recommendations(family, id, page, &locale)
                        .await
                        .map(UpstreamPayload::Listing),
                )
            })
            .await?;
        expect_payload!(payload, Listing)
    }

    async fn similar(
        &self,
        family: CatalogFamily,
        id: u64,
        page: u32,
        locale: &str,
    ) -> UpstreamResult<TmdbPage> {
        let key = Self::key("similar")
            .locale(locale)
            .page(page)
            .entity(format!("{}/{}", family, id));
        let inner = Arc::clone(&self.inner);
        let locale = locale.to_string();

        let payload = self
            .cache
            .fetch(key, move || async move {
                Loaded::from(
                    inner
                        .similar(family, id, page, &locale)
                        .await
                        .map(UpstreamPayload::Listing),
                )
            })
            .await?;
        expect_payload!(payload, Listing)
    }

    async fn search(
        &self,
        family: CatalogFamily,
        query: &str,
        page: u32,
        locale: &str,
        include_adult: bool,
    ) -> UpstreamResult<TmdbPage> {
        let operation = match family {
            CatalogFamily::Tv => "search_tv",
            CatalogFamily::Movie => "search_movie",
        };
        let key = Self::key(operation)
            .locale(locale)
            .page(page)
            .query(query)
            .adult(include_adult);
        let inner = Arc::clone(&self.inner);
        let (query, locale) = (query.to_string(), locale.to_string());

        let payload = self
            .cache
            .fetch(key, move || async move {
                Loaded::from(
                    inner
                        .search(family, &query, page, &locale, include_adult)
                        .await
                        .map(UpstreamPayload::Listing),
                )
            })
            .await?;
        expect_payload!(payload, Listing)
    }

    async fn multi_search(
        &self,
        query: &str,
        page: u32,
        locale: &str,
        include_adult: bool,
    ) -> UpstreamResult<TmdbPage> {
        let key = Self::key("search_multi")
            .locale(locale)
            .page(page)
            .query(query)
            .adult(include_adult);
        let inner = Arc::clone(&self.inner);
        let (query, locale) = (query.to_string(), locale.to_string());

        let payload = self
            .cache
            .fetch(key, move || async move {
                Loaded::from(
                    inner
                        .multi_search(&query, page, &locale, include_adult)
                        .await
                        .map(UpstreamPayload::Listing),
                )
            })
            .await?;
        expect_payload!(payload, Listing)
    }

    async fn tv_detail(&self, id: u64, locale: &str) -> UpstreamResult<TmdbTvDetail> {
        let key = Self::key("tv_detail").locale(locale).entity(id);
        let inner = Arc::clone(&self.inner);
        let locale = locale.to_string();

        let payload = self
            .cache
            .fetch(key, move || async move {
                Loaded::from(
                    inner
                        .tv_detail(id, &locale)
                        .await
                        .map(|detail| UpstreamPayload::TvDetail(Box::new(detail))),
                )
            })
            .await?;
        expect_payload!(payload, TvDetail).map(|detail| *detail)
    }

    async fn movie_detail(&self, id: u64, locale: &str) -> UpstreamResult<TmdbMovieDetail> {
        let key = Self::key("movie_detail").locale(locale).entity(id);
        let inner = Arc::clone(&self.inner);
        let locale = locale.to_string();

        let payload = self
            .cache
            .fetch(key, move || async move {
                Loaded::from(
                    inner
                        .movie_detail(id, &locale)
                        .await
                        .map(|detail| UpstreamPayload::MovieDetail(Box::new(detail))),
                )
            })
            .await?;
        expect_payload!(payload, MovieDetail).map(|detail| *detail)
    }

    async fn watch_providers(
        &self,
        family: CatalogFamily,
        id: u64,
    ) -> UpstreamResult<TmdbWatchProviders> {
        let key = Self::key("watch_providers").entity(format!("{}/{}", family, id));
        let inner = Arc::clone(&self.inner);

        let payload = self
            .cache
            .fetch(key, move || async move {
                Loaded::from(
                    inner
                        .watch_providers(family, id)
                        .await
                        .map(UpstreamPayload::WatchProviders),
                )
            })
            .await?;
        expect_payload!(payload, WatchProviders)
    }

    async fn person_detail(&self, id: u64, locale: &str) -> UpstreamResult<TmdbPersonDetail> {
        let key = Self::key("person_detail").locale(locale).entity(id);
        let inner = Arc::clone(&self.inner);
        let locale = locale.to_string();

        let payload = self
            .cache
            .fetch(key, move || async move {
                Loaded::from(
                    inner
                        .person_detail(id, &locale)
                        .await
                        .map(|detail| UpstreamPayload::PersonDetail(Box::new(detail))),
                )
            })
            .await?;
        expect_payload!(payload, PersonDetail).map(|detail| *detail)
    }
}

/// Decorator that fronts every GraphQL media call with the metadata cache
pub struct CachingMediaGraphRepository {
    inner: Arc<dyn MediaGraphRepository>,
    cache: ExternalMetadataCache<UpstreamPayload>,
}

impl CachingMediaGraphRepository {
    pub fn new(
        inner: Arc<dyn MediaGraphRepository>,
        cache: ExternalMetadataCache<UpstreamPayload>,
    ) -> Self {
        Self { inner, cache }
    }

    fn comic_key(operation: &'static str, query: &ComicQuery) -> CacheKey {
        CacheKey::new(Provider::AniList, operation)
            .page(query.page)
            .entity(format!("{}/{}", query.media_id, query.per_page))
            .adult(query.include_adult)
    }
}

#[async_trait]
impl MediaGraphRepository for CachingMediaGraphRepository {
    async fn comic_detail(&self, query: ComicQuery) -> UpstreamResult<Media> {
        let key = Self::comic_key("comic_detail", &query);
        let inner = Arc::clone(&self.inner);

        let payload = self
            .cache
            .fetch(key, move || async move {
                Loaded::from(
                    inner
                        .comic_detail(query)
                        .await
                        .map(|media| UpstreamPayload::Comic(Box::new(media))),
                )
            })
            .await?;
        expect_payload!(payload, Comic).map(|media| *media)
    }

    async fn comic_recommendations(&self, query: ComicQuery) -> UpstreamResult<Media> {
        let key = Self::comic_key("comic_recommendations", &query);
        let inner = Arc::clone(&self.inner);

        let payload = self
            .cache
            .fetch(key, move || async move {
                Loaded::from(
                    inner
                        .comic_recommendations(query)
                        .await
                        .map(|media| UpstreamPayload::Comic(Box::new(media))),
                )
            })
            .await?;
        expect_payload!(payload, Comic).map(|media| *media)
    }

    async fn comic_search(&self, search: ComicSearch) -> UpstreamResult<MediaPage> {
        let key = CacheKey::new(Provider::AniList, "comic_search")
            .page(search.page)
            .query(&format!("{}/{}", search.keyword, search.per_page))
            .adult(search.include_adult);
        let inner = Arc::clone(&self.inner);

        let payload = self
            .cache
            .fetch(key, move || async move {
                Loaded::from(
                    inner
                        .comic_search(search)
                        .await
                        .map(UpstreamPayload::ComicPage),
                )
            })
            .await?;
        expect_payload!(payload, ComicPage)
    }

    async fn character_detail(&self, character_id: u64) -> UpstreamResult<Character> {
        let key = CacheKey::new(Provider::AniList, "character_detail").entity(character_id);
        let inner = Arc::clone(&self.inner);

        let payload = self
            .cache
            .fetch(key, move || async move {
                Loaded::from(
                    inner
                        .character_detail(character_id)
                        .await
                        .map(|character| UpstreamPayload::Character(Box::new(character))),
                )
            })
            .await?;
        expect_payload!(payload, Character).map(|character| *character)
    }
}
