use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::modules::provider::infrastructure::adapters::{
    anilist::models::{Media, MediaCoverImage, MediaRef, MediaTitle},
    tmdb::models::TmdbItem,
};
use crate::shared::domain::value_objects::{Bucket, CatalogFamily, MediaFamily, Provider};

/// Provider-agnostic unit of content placed in responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: u64,
    pub provider: Provider,
    /// Upstream family the item came from; a theatrical anime keeps `movie`
    pub family: MediaFamily,
    pub bucket: Bucket,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub poster_path: String,
    pub backdrop_path: String,
    pub genre_ids: Vec<u32>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub release_date: Option<NaiveDate>,
}

impl ContentItem {
    /// Catalog listing entry, already bucketed
    pub fn from_catalog(item: &TmdbItem, family: CatalogFamily, bucket: Bucket) -> Self {
        Self {
            id: item.id,
            provider: Provider::Tmdb,
            family: family.into(),
            bucket,
            title: item.display_title().unwrap_or_default().to_string(),
            original_title: item.original_display_title().map(str::to_string),
            overview: item.overview.clone().filter(|o| !o.is_empty()),
            poster_path: item.poster_path.clone().unwrap_or_default(),
            backdrop_path: item.backdrop_path.clone().unwrap_or_default(),
            genre_ids: item.genre_ids().to_vec(),
            popularity: item.popularity,
            vote_average: item.vote_average,
            vote_count: item.vote_count,
            release_date: item.air_or_release_date().and_then(parse_date),
        }
    }

    /// Partial comic entry from a relation or recommendation edge
    pub fn from_comic_ref(media: &MediaRef) -> Option<Self> {
        let id = media.id?;
        Some(Self::comic(
            id,
            media.title.as_ref(),
            media.cover_image.as_ref(),
        ))
    }

    /// Comic entry from a search result
    pub fn from_comic(media: &Media) -> Option<Self> {
        let id = media.id?;
        let mut item = Self::comic(id, media.title.as_ref(), media.cover_image.as_ref());
        item.popularity = media.popularity.map(f64::from);
        item.vote_average = media.average_score.map(|score| f64::from(score) / 10.0);
        item.release_date = media.start_date.as_ref().and_then(|date| {
            NaiveDate::from_ymd_opt(date.year?, date.month.unwrap_or(1), date.day.unwrap_or(1))
        });
        Some(item)
    }

    /// Missing title or artwork default to empty strings
    fn comic(id: u64, title: Option<&MediaTitle>, cover: Option<&MediaCoverImage>) -> Self {
        Self {
            id,
            provider: Provider::AniList,
            family: MediaFamily::Comic,
            bucket: Bucket::Comic,
            title: title
                .and_then(|t| t.user_preferred.clone())
                .unwrap_or_default(),
            original_title: title.and_then(|t| t.native.clone()),
            overview: None,
            poster_path: cover
                .and_then(|c| c.extra_large.clone())
                .unwrap_or_default(),
            backdrop_path: cover.and_then(|c| c.large.clone()).unwrap_or_default(),
            genre_ids: Vec::new(),
            popularity: None,
            vote_average: None,
            vote_count: None,
            release_date: None,
        }
    }
}

/// TMDB dates are `YYYY-MM-DD`; blanks and garbage become `None`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_catalog_uses_tv_name_and_air_date() {
        let item = TmdbItem {
            id: 1399,
            name: Some("Game of Thrones".into()),
            first_air_date: Some("2011-04-17".into()),
            genre_ids: Some(vec![18, 10765]),
            poster_path: Some("/poster.jpg".into()),
            ..TmdbItem::default()
        };

        let content = ContentItem::from_catalog(&item, CatalogFamily::Tv, Bucket::Drama);
        assert_eq!(content.title, "Game of Thrones");
        assert_eq!(content.family, MediaFamily::Tv);
        assert_eq!(content.release_date, NaiveDate::from_ymd_opt(2011, 4, 17));
        assert_eq!(content.backdrop_path, "");
        assert_eq!(content.genre_ids, vec![18, 10765]);
    }

    #[test]
    fn test_comic_ref_defaults_missing_substructures() {
        let media = MediaRef {
            id: Some(101),
            ..MediaRef::default()
        };
        let content = ContentItem::from_comic_ref(&media).unwrap();
        assert_eq!(content.bucket, Bucket::Comic);
        assert_eq!(content.title, "");
        assert_eq!(content.poster_path, "");
        assert_eq!(content.backdrop_path, "");

        assert!(ContentItem::from_comic_ref(&MediaRef::default()).is_none());
    }

    #[test]
    fn test_parse_date_rejects_blank() {
        assert!(parse_date("").is_none());
        assert!(parse_date("2020-13-40").is_none());
        assert_eq!(parse_date("1999-03-31"), NaiveDate::from_ymd_opt(1999, 3, 31));
    }
}
