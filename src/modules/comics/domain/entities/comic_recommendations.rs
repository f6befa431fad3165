use serde::{Deserialize, Serialize};

use crate::modules::catalog::domain::entities::ContentItem;

/// Related and recommended comics for one title
///
/// `results` is the related list (first page only) followed by the
/// recommended list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicRecommendations {
    pub page: u32,
    pub has_more: bool,
    pub related_titles: Vec<ContentItem>,
    pub recommended_titles: Vec<ContentItem>,
    pub results: Vec<ContentItem>,
}

impl ComicRecommendations {
    pub fn empty(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn new(
        page: u32,
        has_more: bool,
        related_titles: Vec<ContentItem>,
        recommended_titles: Vec<ContentItem>,
    ) -> Self {
        let results = related_titles
            .iter()
            .chain(recommended_titles.iter())
            .cloned()
            .collect();
        Self {
            page,
            has_more,
            related_titles,
            recommended_titles,
            results,
        }
    }
}
