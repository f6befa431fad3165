use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Response envelopes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbGenreList {
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmdbGenre {
    pub id: u32,
    pub name: String,
}

/// Paged listing shared by recommendations, similar titles and search
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<TmdbItem>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl TmdbPage {
    pub fn empty(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_results == 0 && self.results.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbError {
    pub status_code: u16,
    pub status_message: String,
    #[serde(default)]
    pub success: Option<bool>,
}

/// Listing entry; TV entries carry `name`, movie entries carry `title`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbItem {
    pub id: u64,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Option<Vec<u32>>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default)]
    pub adult: Option<bool>,
}

impl TmdbItem {
    /// Localized display title regardless of media type
    pub fn display_title(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.title.as_deref())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn original_display_title(&self) -> Option<&str> {
        self.original_name
            .as_deref()
            .or(self.original_title.as_deref())
    }

    pub fn air_or_release_date(&self) -> Option<&str> {
        self.first_air_date
            .as_deref()
            .or(self.release_date.as_deref())
    }

    pub fn genre_ids(&self) -> &[u32] {
        self.genre_ids.as_deref().unwrap_or(&[])
    }
}

// Detail types
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbCastMember {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbSeason {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub season_number: Option<u32>,
    #[serde(default)]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbTvDetail {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub last_air_date: Option<String>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub seasons: Vec<TmdbSeason>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default)]
    pub adult: Option<bool>,
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbMovieDetail {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default)]
    pub adult: Option<bool>,
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
}

// Person detail
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbPersonDetail {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub also_known_as: Vec<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    /// 0 unknown, 1 female, 2 male, 3 non-binary
    #[serde(default)]
    pub gender: Option<u8>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub adult: Option<bool>,
    #[serde(default)]
    pub tv_credits: Option<TmdbPersonCredits>,
    #[serde(default)]
    pub movie_credits: Option<TmdbPersonCredits>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbPersonCredits {
    #[serde(default)]
    pub cast: Vec<TmdbPersonCredit>,
    #[serde(default)]
    pub crew: Vec<TmdbPersonCredit>,
}

/// One credit row; TV rows fill `name`/`first_credit_air_date`, movie rows `title`/`release_date`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbPersonCredit {
    pub id: u64,
    #[serde(default)]
    pub credit_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub first_credit_air_date: Option<String>,
    #[serde(default)]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

// Watch providers
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbWatchProviders {
    #[serde(default)]
    pub id: Option<u64>,
    /// Keyed by ISO 3166-1 region code (`KR`, `JP`, ...)
    #[serde(default)]
    pub results: HashMap<String, TmdbWatchRegion>,
}

impl TmdbWatchProviders {
    /// First available link among the preferred regions, in order
    pub fn link_for(&self, regions: &[&str]) -> Option<String> {
        regions
            .iter()
            .filter_map(|region| self.results.get(*region))
            .find_map(|entry| entry.link.clone().filter(|l| !l.is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbWatchRegion {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Vec<TmdbWatchProvider>,
    #[serde(default)]
    pub rent: Vec<TmdbWatchProvider>,
    #[serde(default)]
    pub buy: Vec<TmdbWatchProvider>,
    #[serde(default)]
    pub ads: Vec<TmdbWatchProvider>,
    #[serde(default)]
    pub free: Vec<TmdbWatchProvider>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TmdbWatchProvider {
    pub provider_id: u64,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub display_priority: Option<u32>,
}
