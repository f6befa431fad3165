use serde::{Deserialize, Serialize};

use crate::modules::catalog::domain::entities::ContentItem;
use crate::shared::application::pagination::PageInfo;
use crate::shared::domain::value_objects::Bucket;

/// First-page results for every bucket, truncated to the display cap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAllResponse {
    pub anime: Vec<ContentItem>,
    pub drama: Vec<ContentItem>,
    pub movie: Vec<ContentItem>,
    pub comics: Vec<ContentItem>,
    pub is_anime_view_more: bool,
    pub is_drama_view_more: bool,
    pub is_movie_view_more: bool,
    pub is_comics_view_more: bool,
}

/// One page of a single bucket ("view more")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketPage {
    pub bucket: Bucket,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub has_more: bool,
    pub results: Vec<ContentItem>,
}

impl BucketPage {
    pub fn new(bucket: Bucket, info: PageInfo, results: Vec<ContentItem>) -> Self {
        Self {
            bucket,
            page: info.page,
            total_pages: info.total_pages,
            total_results: info.total_results,
            has_more: info.has_more(),
            results,
        }
    }
}
