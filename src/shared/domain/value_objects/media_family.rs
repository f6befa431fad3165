use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level content grouping used by the upstreams
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MediaFamily {
    Tv,
    Movie,
    Comic,
}

/// The subset of media families served by the REST catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CatalogFamily {
    Tv,
    Movie,
}

impl CatalogFamily {
    pub const ALL: [CatalogFamily; 2] = [CatalogFamily::Tv, CatalogFamily::Movie];

    /// Path segment used by the catalog endpoints
    pub fn path_segment(&self) -> &'static str {
        match self {
            CatalogFamily::Tv => "tv",
            CatalogFamily::Movie => "movie",
        }
    }
}

impl From<CatalogFamily> for MediaFamily {
    fn from(family: CatalogFamily) -> Self {
        match family {
            CatalogFamily::Tv => MediaFamily::Tv,
            CatalogFamily::Movie => MediaFamily::Movie,
        }
    }
}

impl fmt::Display for MediaFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaFamily::Tv => "tv",
            MediaFamily::Movie => "movie",
            MediaFamily::Comic => "comic",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for CatalogFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}
