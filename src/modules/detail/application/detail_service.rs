use std::sync::Arc;

use futures::future::join;
use log::{debug, info, warn};

use crate::modules::comics::application::comics_aggregator::ANILIST_API_ERROR;
use crate::modules::detail::domain::entities::{
    CharacterDetail, ComicDetail, MovieDetail, PersonDetail, TvDetail,
};
use crate::modules::provider::{
    infrastructure::adapters::tmdb::models::TmdbWatchProviders, CatalogRepository, ComicQuery,
    MediaGraphRepository,
};
use crate::shared::{
    application::pagination::PageRequest,
    domain::value_objects::CatalogFamily,
    errors::{AppError, AppResult, UpstreamError, UpstreamResult},
};

/// Watch-provider regions, most preferred first
pub const WATCH_REGIONS: [&str; 2] = ["KR", "JP"];

const TMDB_PERSON_API_ERROR: &str = "TMDB Person API Error";

/// Detail lookups for catalog titles, comics and characters
pub struct DetailService {
    repository: Arc<dyn CatalogRepository>,
    graph: Arc<dyn MediaGraphRepository>,
    locale: String,
    characters_per_page: u32,
}

impl DetailService {
    pub fn new(
        repository: Arc<dyn CatalogRepository>,
        graph: Arc<dyn MediaGraphRepository>,
        locale: &str,
        characters_per_page: u32,
    ) -> Self {
        Self {
            repository,
            graph,
            locale: locale.to_string(),
            characters_per_page: characters_per_page.max(1),
        }
    }

    pub async fn resolve_tv_detail(&self, id: u64) -> AppResult<TvDetail> {
        let (detail, providers) = join(
            self.repository.tv_detail(id, &self.locale),
            self.repository.watch_providers(CatalogFamily::Tv, id),
        )
        .await;

        let detail = detail.map_err(|e| detail_error(CatalogFamily::Tv, e))?;
        let link = watch_link(CatalogFamily::Tv, id, providers)?;
        info!("TMDB: resolved TV detail {}", id);
        Ok(TvDetail::from_tmdb(detail, self.cast_limit(), link))
    }

    pub async fn resolve_movie_detail(&self, id: u64) -> AppResult<MovieDetail> {
        let (detail, providers) = join(
            self.repository.movie_detail(id, &self.locale),
            self.repository.watch_providers(CatalogFamily::Movie, id),
        )
        .await;

        let detail = detail.map_err(|e| detail_error(CatalogFamily::Movie, e))?;
        let link = watch_link(CatalogFamily::Movie, id, providers)?;
        info!("TMDB: resolved movie detail {}", id);
        Ok(MovieDetail::from_tmdb(detail, self.cast_limit(), link))
    }

    /// `page` pages through the comic's characters
    pub async fn resolve_comic_detail(
        &self,
        id: u64,
        page: PageRequest,
        include_adult: bool,
    ) -> AppResult<ComicDetail> {
        let query = ComicQuery::new(id, page.page, self.characters_per_page, include_adult);
        let media = self.graph.comic_detail(query).await.map_err(anilist_error)?;

        debug!("AniList: resolved comic detail {} page {}", id, page.page);
        Ok(ComicDetail::from_anilist(&media, id, page.page))
    }

    pub async fn resolve_character(&self, character_id: u64) -> AppResult<CharacterDetail> {
        let character = self
            .graph
            .character_detail(character_id)
            .await
            .map_err(anilist_error)?;
        Ok(CharacterDetail::from_anilist(&character, character_id))
    }

    /// Person profile with TV and movie credits merged
    pub async fn resolve_person(&self, person_id: u64) -> AppResult<PersonDetail> {
        let detail = self
            .repository
            .person_detail(person_id, &self.locale)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    AppError::Upstream(e)
                } else {
                    AppError::wrap(TMDB_PERSON_API_ERROR, e)
                }
            })?;

        if detail.tv_credits.is_none() && detail.movie_credits.is_none() {
            warn!("TMDB: person {} has no credits data", person_id);
        }
        info!("TMDB: resolved person detail {}", person_id);
        Ok(PersonDetail::from_tmdb(detail))
    }

    fn cast_limit(&self) -> usize {
        self.characters_per_page as usize
    }
}

fn detail_error(family: CatalogFamily, e: UpstreamError) -> AppError {
    if e.is_not_found() {
        return AppError::Upstream(e);
    }
    let context = match family {
        CatalogFamily::Tv => "TMDB TV API Error",
        CatalogFamily::Movie => "TMDB Movie API Error",
    };
    AppError::wrap(context, e)
}

fn anilist_error(e: UpstreamError) -> AppError {
    if e.is_not_found() {
        AppError::Upstream(e)
    } else {
        AppError::wrap(ANILIST_API_ERROR, e)
    }
}

/// A title without watch-provider data has no link
fn watch_link(
    family: CatalogFamily,
    id: u64,
    providers: UpstreamResult<TmdbWatchProviders>,
) -> AppResult<Option<String>> {
    match providers {
        Ok(providers) => Ok(providers.link_for(&WATCH_REGIONS)),
        Err(e) if e.is_not_found() => {
            debug!("TMDB: no watch providers for {} {}", family, id);
            Ok(None)
        }
        Err(e) => Err(detail_error(family, e)),
    }
}
