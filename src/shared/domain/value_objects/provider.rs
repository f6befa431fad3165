use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream metadata providers fronted by the hub
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Provider {
    /// TMDB REST catalog (TV and movies)
    #[serde(rename = "tmdb")]
    Tmdb,
    /// AniList GraphQL media API (comics)
    #[serde(rename = "anilist")]
    AniList,
}

impl Provider {
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Tmdb => "TMDB",
            Provider::AniList => "AniList",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Tmdb => "tmdb",
            Provider::AniList => "anilist",
        };
        write!(f, "{}", name)
    }
}
