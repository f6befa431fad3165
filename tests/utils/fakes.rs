/// Hand-written upstream fakes with call recording
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use content_hub::modules::provider::infrastructure::adapters::{
    anilist::models::{Character, Media, MediaPage},
    tmdb::models::{
        TmdbGenre, TmdbMovieDetail, TmdbPage, TmdbPersonDetail, TmdbTvDetail, TmdbWatchProviders,
    },
};
use content_hub::modules::provider::{
    CatalogRepository, ComicQuery, ComicSearch, MediaGraphRepository,
};
use content_hub::{CatalogFamily, Provider, UpstreamError, UpstreamResult};

use super::factories::{movie_genres, tv_genres};

pub fn not_found(resource: &str) -> UpstreamError {
    UpstreamError::not_found(Provider::Tmdb, resource)
}

pub fn server_error() -> UpstreamError {
    UpstreamError::status(Provider::Tmdb, 500, "internal error")
}

pub fn timeout() -> UpstreamError {
    UpstreamError::Timeout {
        provider: Provider::Tmdb,
    }
}

/// Scripted catalog upstream
///
/// Every call is appended to `calls` as `operation:family:locale`. Unscripted
/// listings answer with an empty page.
pub struct FakeCatalogRepository {
    pub calls: Arc<Mutex<Vec<String>>>,
    genres: HashMap<CatalogFamily, UpstreamResult<Vec<TmdbGenre>>>,
    recommendations: HashMap<String, UpstreamResult<TmdbPage>>,
    similar: Option<UpstreamResult<TmdbPage>>,
    search: HashMap<CatalogFamily, UpstreamResult<TmdbPage>>,
    multi: Option<UpstreamResult<TmdbPage>>,
    tv_detail: Option<UpstreamResult<TmdbTvDetail>>,
    movie_detail: Option<UpstreamResult<TmdbMovieDetail>>,
    watch_providers: Option<UpstreamResult<TmdbWatchProviders>>,
    person_detail: Option<UpstreamResult<TmdbPersonDetail>>,
    latency: Option<Duration>,
}

impl Default for FakeCatalogRepository {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            genres: HashMap::from([
                (CatalogFamily::Tv, Ok(tv_genres())),
                (CatalogFamily::Movie, Ok(movie_genres())),
            ]),
            recommendations: HashMap::new(),
            similar: None,
            search: HashMap::new(),
            multi: None,
            tv_detail: None,
            movie_detail: None,
            watch_providers: None,
            person_detail: None,
            latency: None,
        }
    }
}

impl FakeCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genres(
        mut self,
        family: CatalogFamily,
        result: UpstreamResult<Vec<TmdbGenre>>,
    ) -> Self {
        self.genres.insert(family, result);
        self
    }

    pub fn with_recommendations(mut self, locale: &str, result: UpstreamResult<TmdbPage>) -> Self {
        self.recommendations.insert(locale.to_string(), result);
        self
    }

    pub fn with_similar(mut self, result: UpstreamResult<TmdbPage>) -> Self {
        self.similar = Some(result);
        self
    }

    pub fn with_search(mut self, family: CatalogFamily, result: UpstreamResult<TmdbPage>) -> Self {
        self.search.insert(family, result);
        self
    }

    pub fn with_multi_search(mut self, result: UpstreamResult<TmdbPage>) -> Self {
        self.multi = Some(result);
        self
    }

    pub fn with_tv_detail(mut self, result: UpstreamResult<TmdbTvDetail>) -> Self {
        self.tv_detail = Some(result);
        self
    }

    pub fn with_movie_detail(mut self, result: UpstreamResult<TmdbMovieDetail>) -> Self {
        self.movie_detail = Some(result);
        self
    }

    pub fn with_watch_providers(mut self, result: UpstreamResult<TmdbWatchProviders>) -> Self {
        self.watch_providers = Some(result);
        self
    }

    pub fn with_person_detail(mut self, result: UpstreamResult<TmdbPersonDetail>) -> Self {
        self.person_detail = Some(result);
        self
    }

    /// Delay every call, to widen race windows
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.split(':').next() == Some(operation))
            .count()
    }

    async fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn listing(scripted: Option<&UpstreamResult<TmdbPage>>, page: u32) -> UpstreamResult<TmdbPage> {
        scripted.cloned().unwrap_or_else(|| Ok(TmdbPage::empty(page)))
    }
}

#[async_trait]
impl CatalogRepository for FakeCatalogRepository {
    async fn genres(&self, family: CatalogFamily, locale: &str) -> UpstreamResult<Vec<TmdbGenre>> {
        self.record(format!("genres:{}:{}", family, locale)).await;
        self.genres
            .get(&family)
            .cloned()
            .unwrap_or_else(|| Err(not_found("/genre/list")))
    }

    async fn recommendations(
        &self,
        family: CatalogFamily,
        id: u64,
        page: u32,
        locale: &str,
    ) -> UpstreamResult<TmdbPage> {
        self.record(format!("recommendations:{}:{}:{}:{}", family, locale, id, page)).await;
        Self::listing(self.recommendations.get(locale), page)
    }

    async fn similar(
        &self,
        family: CatalogFamily,
        id: u64,
        page: u32,
        locale: &str,
    ) -> UpstreamResult<TmdbPage> {
        self.record(format!("similar:{}:{}:{}:{}", family, locale, id, page)).await;
        Self::listing(self.similar.as_ref(), page)
    }

    async fn search(
        &self,
        family: CatalogFamily,
        query: &str,
        page: u32,
        locale: &str,
        _include_adult: bool,
    ) -> UpstreamResult<TmdbPage> {
        self.record(format!("search:{}:{}:{}:{}", family, locale, query, page)).await;
        Self::listing(self.search.get(&family), page)
    }

    async fn multi_search(
        &self,
        query: &str,
        page: u32,
        locale: &str,
        _include_adult: bool,
    ) -> UpstreamResult<TmdbPage> {
        self.record(format!("multi_search:{}:{}:{}", locale, query, page)).await;
        Self::listing(self.multi.as_ref(), page)
    }

    async fn tv_detail(&self, id: u64, locale: &str) -> UpstreamResult<TmdbTvDetail> {
        self.record(format!("tv_detail:{}:{}", locale, id)).await;
        self.tv_detail
            .clone()
            .unwrap_or_else(|| Err(not_found(&format!("/tv/{}", id))))
    }

    async fn movie_detail(&self, id: u64, locale: &str) -> UpstreamResult<TmdbMovieDetail> {
        self.record(format!("movie_detail:{}:{}", locale, id)).await;
        self.movie_detail
            .clone()
            .unwrap_or_else(|| Err(not_found(&format!("/movie/{}", id))))
    }

    async fn watch_providers(
        &self,
        family: CatalogFamily,
        id: u64,
    ) -> UpstreamResult<TmdbWatchProviders> {
        self.record(format!("watch_providers:{}:{}", family, id)).await;
        self.watch_providers
            .clone()
            .unwrap_or_else(|| Err(not_found(&format!("/{}/{}/watch/providers", family, id))))
    }

    async fn person_detail(&self, id: u64, locale: &str) -> UpstreamResult<TmdbPersonDetail> {
        self.record(format!("person_detail:{}:{}", locale, id)).await;
        self.person_detail
            .clone()
            .unwrap_or_else(|| Err(not_found(&format!("/person/{}", id))))
    }
}

/// Scripted GraphQL upstream; records the queries it receives
#[derive(Default)]
pub struct FakeMediaGraphRepository {
    pub queries: Arc<Mutex<Vec<ComicQuery>>>,
    pub searches: Arc<Mutex<Vec<ComicSearch>>>,
    comic: Option<UpstreamResult<Media>>,
    search_page: Option<UpstreamResult<MediaPage>>,
    character: Option<UpstreamResult<Character>>,
}

impl FakeMediaGraphRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comic(mut self, result: UpstreamResult<Media>) -> Self {
        self.comic = Some(result);
        self
    }

    pub fn with_search(mut self, result: UpstreamResult<MediaPage>) -> Self {
        self.search_page = Some(result);
        self
    }

    pub fn with_character(mut self, result: UpstreamResult<Character>) -> Self {
        self.character = Some(result);
        self
    }

    fn comic_result(&self, query: ComicQuery) -> UpstreamResult<Media> {
        self.queries.lock().unwrap().push(query);
        self.comic.clone().unwrap_or_else(|| {
            Err(UpstreamError::not_found(
                Provider::AniList,
                format!("Media {}", query.media_id),
            ))
        })
    }
}

#[async_trait]
impl MediaGraphRepository for FakeMediaGraphRepository {
    async fn comic_detail(&self, query: ComicQuery) -> UpstreamResult<Media> {
        self.comic_result(query)
    }

    async fn comic_recommendations(&self, query: ComicQuery) -> UpstreamResult<Media> {
        self.comic_result(query)
    }

    async fn comic_search(&self, search: ComicSearch) -> UpstreamResult<MediaPage> {
        self.searches.lock().unwrap().push(search);
        self.search_page.clone().unwrap_or_else(|| Ok(MediaPage::default()))
    }

    async fn character_detail(&self, character_id: u64) -> UpstreamResult<Character> {
        self.character.clone().unwrap_or_else(|| {
            Err(UpstreamError::not_found(
                Provider::AniList,
                format!("Character {}", character_id),
            ))
        })
    }
}
