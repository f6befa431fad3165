use crate::modules::provider::infrastructure::adapters::{
    anilist::models::{Character, Media, MediaPage},
    tmdb::models::{TmdbMovieDetail, TmdbPage, TmdbPersonDetail, TmdbTvDetail, TmdbWatchProviders},
};
use crate::shared::errors::UpstreamError;

/// Raw upstream payload as stored by the metadata cache (pre-classification)
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamPayload {
    Listing(TmdbPage),
    TvDetail(Box<TmdbTvDetail>),
    MovieDetail(Box<TmdbMovieDetail>),
    WatchProviders(TmdbWatchProviders),
    PersonDetail(Box<TmdbPersonDetail>),
    Comic(Box<Media>),
    ComicPage(MediaPage),
    Character(Box<Character>),
}

impl UpstreamPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamPayload::Listing(_) => "listing",
            UpstreamPayload::TvDetail(_) => "tv_detail",
            UpstreamPayload::MovieDetail(_) => "movie_detail",
            UpstreamPayload::WatchProviders(_) => "watch_providers",
            UpstreamPayload::PersonDetail(_) => "person_detail",
            UpstreamPayload::Comic(_) => "comic",
            UpstreamPayload::ComicPage(_) => "comic_page",
            UpstreamPayload::Character(_) => "character",
        }
    }

    /// Error for a cached payload of the wrong kind under a key
    pub fn mismatch(&self, expected: &str) -> UpstreamError {
        UpstreamError::Aborted {
            message: format!(
                "cached payload kind '{}' does not match expected '{}'",
                self.kind(),
                expected
            ),
        }
    }
}
