use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized content category assigned by classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Anime,
    Drama,
    Movie,
    Comic,
}

impl Bucket {
    /// Legacy numeric code the frontend uses for media-type routing
    pub fn code(&self) -> &'static str {
        match self {
            Bucket::Anime => "1",
            Bucket::Drama => "2",
            Bucket::Movie => "3",
            Bucket::Comic => "4",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bucket::Anime => "anime",
            Bucket::Drama => "drama",
            Bucket::Movie => "movie",
            Bucket::Comic => "comic",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anime" | "ani" | "1" => Ok(Bucket::Anime),
            "drama" | "2" => Ok(Bucket::Drama),
            "movie" | "3" => Ok(Bucket::Movie),
            "comic" | "comics" | "4" => Ok(Bucket::Comic),
            other => Err(format!("Unknown bucket '{}'", other)),
        }
    }
}
