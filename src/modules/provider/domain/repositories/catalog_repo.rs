use async_trait::async_trait;

use crate::modules::provider::infrastructure::adapters::tmdb::models::{
    TmdbGenre, TmdbMovieDetail, TmdbPage, TmdbPersonDetail, TmdbTvDetail, TmdbWatchProviders,
};
use crate::shared::{domain::value_objects::CatalogFamily, errors::UpstreamResult};

/// REST catalog operations (TV and movies)
///
/// Every call resolves to success, `UpstreamError::NotFound`, or another
/// upstream failure; callers route on that tag.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Genre taxonomy for one family
    async fn genres(&self, family: CatalogFamily, locale: &str) -> UpstreamResult<Vec<TmdbGenre>>;

    /// Community recommendations for a title
    async fn recommendations(
        &self,
        family: CatalogFamily,
        id: u64,
        page: u32,
        locale: &str,
    ) -> UpstreamResult<TmdbPage>;

    /// Broader "similar titles" listing
    async fn similar(
        &self,
        family: CatalogFamily,
        id: u64,
        page: u32,
        locale: &str,
    ) -> UpstreamResult<TmdbPage>;

    async fn search(
        &self,
        family: CatalogFamily,
        query: &str,
        page: u32,
        locale: &str,
        include_adult: bool,
    ) -> UpstreamResult<TmdbPage>;

    /// Combined TV/movie/person search; entries carry `media_type`
    async fn multi_search(
        &self,
        query: &str,
        page: u32,
        locale: &str,
        include_adult: bool,
    ) -> UpstreamResult<TmdbPage>;

    /// TV detail with credits appended
    async fn tv_detail(&self, id: u64, locale: &str) -> UpstreamResult<TmdbTvDetail>;

    /// Movie detail with credits appended
    async fn movie_detail(&self, id: u64, locale: &str) -> UpstreamResult<TmdbMovieDetail>;

    async fn watch_providers(
        &self,
        family: CatalogFamily,
        id: u64,
    ) -> UpstreamResult<TmdbWatchProviders>;

    /// Person detail with TV and movie credits appended
    async fn person_detail(&self, id: u64, locale: &str) -> UpstreamResult<TmdbPersonDetail>;
}
