/// Test data factories using builder pattern
///
/// Provides upstream payloads with sensible defaults
use content_hub::modules::provider::infrastructure::adapters::{
    anilist::models::{MediaCoverImage, MediaRef, MediaTitle, MediaType},
    tmdb::models::{TmdbGenre, TmdbPage},
};
use content_hub::modules::provider::infrastructure::adapters::tmdb::models::TmdbItem;

pub const ANIMATION: u32 = 16;
pub const DRAMA: u32 = 18;
pub const DOCUMENTARY: u32 = 99;
pub const SOAP: u32 = 10766;
pub const ACTION: u32 = 28;

/// `{Animation:16, Drama:18, Documentary:99}` plus a few extra TV genres
pub fn tv_genres() -> Vec<TmdbGenre> {
    vec![
        genre(ANIMATION, "Animation"),
        genre(DRAMA, "Drama"),
        genre(DOCUMENTARY, "Documentary"),
        genre(10762, "Kids"),
        genre(SOAP, "Soap"),
    ]
}

pub fn movie_genres() -> Vec<TmdbGenre> {
    vec![
        genre(ANIMATION, "Animation"),
        genre(DRAMA, "Drama"),
        genre(ACTION, "Action"),
    ]
}

pub fn genre(id: u32, name: &str) -> TmdbGenre {
    TmdbGenre {
        id,
        name: name.to_string(),
    }
}

pub struct ItemFactory {
    item: TmdbItem,
}

impl ItemFactory {
    pub fn tv(id: u64, name: &str) -> Self {
        Self {
            item: TmdbItem {
                id,
                name: Some(name.to_string()),
                media_type: Some("tv".to_string()),
                ..TmdbItem::default()
            },
        }
    }

    pub fn movie(id: u64, title: &str) -> Self {
        Self {
            item: TmdbItem {
                id,
                title: Some(title.to_string()),
                media_type: Some("movie".to_string()),
                ..TmdbItem::default()
            },
        }
    }

    pub fn person(id: u64, name: &str) -> Self {
        Self {
            item: TmdbItem {
                id,
                name: Some(name.to_string()),
                media_type: Some("person".to_string()),
                ..TmdbItem::default()
            },
        }
    }

    pub fn genres(mut self, ids: &[u32]) -> Self {
        self.item.genre_ids = Some(ids.to_vec());
        self
    }

    pub fn build(self) -> TmdbItem {
        self.item
    }
}

/// Listing page whose totals reflect `items`
pub fn page(page: u32, total_pages: u32, items: Vec<TmdbItem>) -> TmdbPage {
    TmdbPage {
        page,
        total_pages,
        total_results: items.len() as u32,
        results: items,
    }
}

/// `count` TV dramas with ids starting at `first_id`
pub fn dramas(first_id: u64, count: usize) -> Vec<TmdbItem> {
    (0..count as u64)
        .map(|n| {
            ItemFactory::tv(first_id + n, &format!("Drama {}", first_id + n))
                .genres(&[DRAMA])
                .build()
        })
        .collect()
}

pub fn manga_ref(id: u64, title: &str) -> MediaRef {
    MediaRef {
        id: Some(id),
        media_type: Some(MediaType::Manga),
        title: Some(MediaTitle {
            user_preferred: Some(title.to_string()),
            ..MediaTitle::default()
        }),
        cover_image: Some(MediaCoverImage {
            extra_large: Some(format!("https://img/{}/xl.jpg", id)),
            large: Some(format!("https://img/{}/l.jpg", id)),
            ..MediaCoverImage::default()
        }),
    }
}

pub fn anime_ref(id: u64, title: &str) -> MediaRef {
    MediaRef {
        media_type: Some(MediaType::Anime),
        ..manga_ref(id, title)
    }
}
