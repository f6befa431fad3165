use std::collections::HashSet;

use log::debug;

use crate::modules::catalog::domain::entities::{ContentItem, GenreTaxonomy};
use crate::modules::provider::infrastructure::adapters::tmdb::models::TmdbItem;
use crate::shared::domain::value_objects::{Bucket, CatalogFamily, MediaFamily};

pub const ANIMATION: &str = "Animation";

/// TV genres that keep a show out of the drama bucket
pub const DRAMA_EXCLUDED: [&str; 5] = ["Documentary", "Kids", "News", "Reality", "Talk"];

/// TV genres accepted as keyword suggestions
pub const SUGGESTIBLE_TV: [&str; 3] = ["Animation", "Drama", "Soap"];

/// Assigns content to a bucket from its family and genre ids
pub struct ContentClassifier;

impl ContentClassifier {
    /// Bucket for one item, or `None` when the item fits no bucket
    ///
    /// `taxonomy` must belong to the same catalog family as the item; comics
    /// ignore it.
    pub fn classify(
        family: MediaFamily,
        genre_ids: &[u32],
        taxonomy: &GenreTaxonomy,
    ) -> Option<Bucket> {
        match family {
            MediaFamily::Comic => Some(Bucket::Comic),
            MediaFamily::Tv => {
                if genre_ids.is_empty() {
                    return None;
                }
                if Self::has_any(genre_ids, &taxonomy.ids_of(&[ANIMATION])) {
                    Some(Bucket::Anime)
                } else if Self::has_any(genre_ids, &taxonomy.ids_of(&DRAMA_EXCLUDED)) {
                    None
                } else {
                    Some(Bucket::Drama)
                }
            }
            MediaFamily::Movie => {
                if Self::has_any(genre_ids, &taxonomy.ids_of(&[ANIMATION])) {
                    Some(Bucket::Anime)
                } else {
                    Some(Bucket::Movie)
                }
            }
        }
    }

    /// Classify a listing, dropping items that fit no bucket
    pub fn classify_listing(
        family: CatalogFamily,
        items: &[TmdbItem],
        taxonomy: &GenreTaxonomy,
    ) -> Vec<ContentItem> {
        let classified: Vec<ContentItem> = items
            .iter()
            .filter_map(|item| {
                Self::classify(family.into(), item.genre_ids(), taxonomy)
                    .map(|bucket| ContentItem::from_catalog(item, family, bucket))
            })
            .collect();

        if classified.len() < items.len() {
            debug!(
                "Classifier: dropped {} of {} {} items",
                items.len() - classified.len(),
                items.len(),
                family
            );
        }
        classified
    }

    /// Whether a TV item qualifies as a keyword suggestion
    pub fn is_suggestible_tv(genre_ids: &[u32], taxonomy: &GenreTaxonomy) -> bool {
        Self::has_any(genre_ids, &taxonomy.ids_of(&SUGGESTIBLE_TV))
    }

    fn has_any(genre_ids: &[u32], wanted: &HashSet<u32>) -> bool {
        genre_ids.iter().any(|id| wanted.contains(id))
    }
}
