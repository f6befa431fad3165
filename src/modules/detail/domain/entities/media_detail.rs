use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::modules::catalog::domain::entities::content_item::parse_date;
use crate::modules::provider::infrastructure::adapters::tmdb::models::{
    TmdbCredits, TmdbGenre, TmdbMovieDetail, TmdbTvDetail,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: String,
    pub profile_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvDetail {
    pub id: u64,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub genres: Vec<String>,
    pub poster_path: String,
    pub backdrop_path: String,
    pub first_air_date: Option<NaiveDate>,
    pub last_air_date: Option<NaiveDate>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    pub episode_run_time: Option<u32>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub adult: bool,
    pub cast: Vec<CastMember>,
    /// Watch page for the preferred region, when one exists
    pub link: Option<String>,
}

impl TvDetail {
    pub fn from_tmdb(detail: TmdbTvDetail, cast_limit: usize, link: Option<String>) -> Self {
        Self {
            id: detail.id,
            title: detail.name.unwrap_or_default(),
            original_title: detail.original_name,
            overview: detail.overview.filter(|o| !o.is_empty()),
            status: detail.status,
            homepage: detail.homepage.filter(|h| !h.is_empty()),
            genres: genre_names(&detail.genres),
            poster_path: detail.poster_path.unwrap_or_default(),
            backdrop_path: detail.backdrop_path.unwrap_or_default(),
            first_air_date: detail.first_air_date.as_deref().and_then(parse_date),
            last_air_date: detail.last_air_date.as_deref().and_then(parse_date),
            number_of_seasons: detail.number_of_seasons,
            number_of_episodes: detail.number_of_episodes,
            episode_run_time: detail.episode_run_time.first().copied(),
            vote_average: detail.vote_average,
            vote_count: detail.vote_count,
            adult: detail.adult.unwrap_or(false),
            cast: top_cast(detail.credits.as_ref(), cast_limit),
            link,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub genres: Vec<String>,
    pub poster_path: String,
    pub backdrop_path: String,
    pub release_date: Option<NaiveDate>,
    pub runtime: Option<u32>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub adult: bool,
    pub cast: Vec<CastMember>,
    pub link: Option<String>,
}

impl MovieDetail {
    pub fn from_tmdb(detail: TmdbMovieDetail, cast_limit: usize, link: Option<String>) -> Self {
        Self {
            id: detail.id,
            title: detail.title.unwrap_or_default(),
            original_title: detail.original_title,
            overview: detail.overview.filter(|o| !o.is_empty()),
            tagline: detail.tagline.filter(|t| !t.is_empty()),
            status: detail.status,
            homepage: detail.homepage.filter(|h| !h.is_empty()),
            genres: genre_names(&detail.genres),
            poster_path: detail.poster_path.unwrap_or_default(),
            backdrop_path: detail.backdrop_path.unwrap_or_default(),
            release_date: detail.release_date.as_deref().and_then(parse_date),
            runtime: detail.runtime.filter(|minutes| *minutes > 0),
            vote_average: detail.vote_average,
            vote_count: detail.vote_count,
            adult: detail.adult.unwrap_or(false),
            cast: top_cast(detail.credits.as_ref(), cast_limit),
            link,
        }
    }
}

fn genre_names(genres: &[TmdbGenre]) -> Vec<String> {
    genres.iter().map(|g| g.name.clone()).collect()
}

/// Billing order first; members without an order go last
fn top_cast(credits: Option<&TmdbCredits>, limit: usize) -> Vec<CastMember> {
    let Some(credits) = credits else {
        return Vec::new();
    };

    let mut members: Vec<_> = credits.cast.iter().collect();
    members.sort_by_key(|member| member.order.unwrap_or(u32::MAX));
    members
        .into_iter()
        .take(limit)
        .map(|member| CastMember {
            id: member.id,
            name: member.name.clone().unwrap_or_default(),
            character: member.character.clone().unwrap_or_default(),
            profile_path: member.profile_path.clone().unwrap_or_default(),
        })
        .collect()
}
