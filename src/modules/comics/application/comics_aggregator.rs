use std::sync::Arc;

use log::{debug, warn};

use crate::modules::catalog::domain::entities::ContentItem;
use crate::modules::comics::domain::entities::ComicRecommendations;
use crate::modules::provider::{
    infrastructure::adapters::anilist::models::{Media, MediaRef, MediaType},
    ComicQuery, MediaGraphRepository,
};
use crate::shared::{
    application::pagination::PageRequest,
    errors::{AppError, AppResult},
};

pub const ANILIST_API_ERROR: &str = "AniList API Error";

/// Builds related/recommended comic lists from one GraphQL round trip
pub struct ComicsAggregator {
    repository: Arc<dyn MediaGraphRepository>,
    per_page: u32,
}

impl ComicsAggregator {
    pub fn new(repository: Arc<dyn MediaGraphRepository>, per_page: u32) -> Self {
        Self {
            repository,
            per_page: per_page.max(1),
        }
    }

    /// Related titles are only placed on the first page
    pub async fn resolve(
        &self,
        media_id: u64,
        page: PageRequest,
        include_adult: bool,
    ) -> AppResult<ComicRecommendations> {
        let query = ComicQuery::new(media_id, page.page, self.per_page, include_adult);

        let media = match self.repository.comic_recommendations(query).await {
            Ok(media) => media,
            Err(e) if e.is_not_found() => {
                warn!("AniList: comic recommendations not found for {}", media_id);
                return Ok(ComicRecommendations::empty(page.page));
            }
            Err(e) => return Err(AppError::wrap(ANILIST_API_ERROR, e)),
        };

        let related = if page.is_first() {
            Self::related_titles(&media)
        } else {
            Vec::new()
        };
        let recommended = Self::recommended_titles(&media);
        let has_more = Self::has_more(&media);

        debug!(
            "AniList: comic {} page {} -> {} related, {} recommended",
            media_id,
            page.page,
            related.len(),
            recommended.len()
        );

        Ok(ComicRecommendations::new(page.page, has_more, related, recommended))
    }

    fn related_titles(media: &Media) -> Vec<ContentItem> {
        let nodes = media
            .relations
            .iter()
            .flat_map(|relations| relations.nodes.iter().flatten());
        Self::same_family(nodes)
    }

    fn recommended_titles(media: &Media) -> Vec<ContentItem> {
        let nodes = media
            .recommendations
            .iter()
            .flat_map(|recommendations| recommendations.nodes.iter().flatten())
            .filter_map(|node| node.media_recommendation.as_ref());
        Self::same_family(nodes)
    }

    fn same_family<'a>(nodes: impl Iterator<Item = &'a MediaRef>) -> Vec<ContentItem> {
        nodes
            .filter(|node| node.media_type == Some(MediaType::Manga))
            .filter_map(ContentItem::from_comic_ref)
            .collect()
    }

    fn has_more(media: &Media) -> bool {
        media
            .recommendations
            .as_ref()
            .and_then(|recommendations| recommendations.page_info.as_ref())
            .map(|info| match (info.current_page, info.last_page) {
                (Some(current), Some(last)) => current < last,
                _ => info.has_next_page.unwrap_or(false),
            })
            .unwrap_or(false)
    }
}
