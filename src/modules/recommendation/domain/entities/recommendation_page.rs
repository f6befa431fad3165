use serde::{Deserialize, Serialize};

use crate::modules::catalog::domain::entities::ContentItem;
use crate::shared::application::pagination::PageInfo;
use crate::shared::domain::value_objects::CatalogFamily;

/// One inbound recommendation lookup; never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub content_id: u64,
    pub page: u32,
    pub family: CatalogFamily,
    pub locale: String,
}

impl RecommendationRequest {
    pub fn new(family: CatalogFamily, content_id: u64, page: u32, locale: &str) -> Self {
        Self {
            content_id,
            page,
            family,
            locale: locale.to_string(),
        }
    }
}

/// Which step of the fallback chain produced the listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RecommendationSource {
    PrimaryLocale,
    FallbackLocale,
    SimilarTitles,
    /// Both locales reported the title as unknown
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPage {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub source: RecommendationSource,
    pub results: Vec<ContentItem>,
}

impl RecommendationPage {
    pub fn new(info: PageInfo, source: RecommendationSource, results: Vec<ContentItem>) -> Self {
        Self {
            page: info.page,
            total_pages: info.total_pages,
            total_results: info.total_results,
            source,
            results,
        }
    }

    pub fn has_more(&self) -> bool {
        PageInfo::new(self.page, self.total_pages, self.total_results).has_more()
    }
}
