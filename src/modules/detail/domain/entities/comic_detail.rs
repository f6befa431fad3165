use serde::{Deserialize, Serialize};

use crate::modules::provider::infrastructure::adapters::anilist::models::{Character, Media};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicCharacter {
    pub id: u64,
    pub name: String,
    pub image: String,
}

impl ComicCharacter {
    fn from_anilist(character: &Character) -> Option<Self> {
        Some(Self {
            id: character.id?,
            name: character
                .name
                .as_ref()
                .and_then(|n| n.user_preferred.clone().or_else(|| n.full.clone()))
                .unwrap_or_default(),
            image: character
                .image
                .as_ref()
                .and_then(|i| i.large.clone().or_else(|| i.medium.clone()))
                .unwrap_or_default(),
        })
    }
}

/// Comic detail with one page of characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicDetail {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub genres: Vec<String>,
    pub adult: bool,
    pub volumes: u32,
    pub chapters: u32,
    pub status: String,
    pub homepage: String,
    pub poster_path: String,
    pub backdrop_path: String,
    /// `YYYY/MM/DD`, or shorter when the upstream only knows part of it
    pub start_date: String,
    pub page: u32,
    pub has_more_characters: bool,
    pub characters: Vec<ComicCharacter>,
}

impl ComicDetail {
    pub fn from_anilist(media: &Media, media_id: u64, page: u32) -> Self {
        let cover = media.cover_image.as_ref();
        let characters = media.characters.as_ref();

        Self {
            id: media.id.unwrap_or(media_id),
            title: media
                .title
                .as_ref()
                .and_then(|t| t.user_preferred.clone())
                .unwrap_or_default(),
            overview: media.description.clone().unwrap_or_default(),
            genres: media.genres.clone(),
            adult: media.is_adult.unwrap_or(false),
            volumes: media.volumes.unwrap_or(0),
            chapters: media.chapters.unwrap_or(0),
            status: media.status.clone().unwrap_or_default(),
            homepage: media.site_url.clone().unwrap_or_default(),
            poster_path: cover.and_then(|c| c.extra_large.clone()).unwrap_or_default(),
            backdrop_path: cover.and_then(|c| c.large.clone()).unwrap_or_default(),
            start_date: media
                .start_date
                .as_ref()
                .and_then(|d| d.format_slashed())
                .unwrap_or_default(),
            page,
            has_more_characters: characters
                .and_then(|c| c.page_info.as_ref())
                .and_then(|info| info.has_next_page)
                .unwrap_or(false),
            characters: characters
                .map(|c| {
                    c.nodes
                        .iter()
                        .flatten()
                        .filter_map(ComicCharacter::from_anilist)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDetail {
    pub id: u64,
    pub name: String,
    pub native_name: String,
    pub alternative_names: Vec<String>,
    pub image: String,
    pub age: String,
    pub gender: String,
    pub description: String,
    pub site_url: String,
}

impl CharacterDetail {
    pub fn from_anilist(character: &Character, character_id: u64) -> Self {
        let name = character.name.as_ref();
        Self {
            id: character.id.unwrap_or(character_id),
            name: name
                .and_then(|n| n.user_preferred.clone().or_else(|| n.full.clone()))
                .unwrap_or_default(),
            native_name: name.and_then(|n| n.native.clone()).unwrap_or_default(),
            alternative_names: name.map(|n| n.alternative.clone()).unwrap_or_default(),
            image: character
                .image
                .as_ref()
                .and_then(|i| i.large.clone())
                .unwrap_or_default(),
            age: character.age.clone().unwrap_or_default(),
            gender: character.gender.clone().unwrap_or_default(),
            description: character.description.clone().unwrap_or_default(),
            site_url: character.site_url.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::provider::infrastructure::adapters::anilist::models::{
        CharacterConnection, CharacterName, FuzzyDate, PageInfo,
    };

    #[test]
    fn test_missing_substructures_default() {
        let detail = ComicDetail::from_anilist(&Media::default(), 77, 1);

        assert_eq!(detail.id, 77);
        assert_eq!(detail.title, "");
        assert_eq!(detail.poster_path, "");
        assert_eq!(detail.start_date, "");
        assert_eq!(detail.volumes, 0);
        assert!(detail.characters.is_empty());
    }

    #[test]
    fn test_characters_and_start_date() {
        let media = Media {
            id: Some(30013),
            start_date: Some(FuzzyDate {
                year: Some(1997),
                month: Some(7),
                day: Some(22),
            }),
            characters: Some(CharacterConnection {
                page_info: Some(PageInfo {
                    has_next_page: Some(true),
                    ..PageInfo::default()
                }),
                nodes: vec![
                    Some(Character {
                        id: Some(40),
                        name: Some(CharacterName {
                            full: Some("Luffy".into()),
                            ..CharacterName::default()
                        }),
                        ..Character::default()
                    }),
                    None,
                ],
            }),
            ..Media::default()
        };

        let detail = ComicDetail::from_anilist(&media, 30013, 1);
        assert_eq!(detail.start_date, "1997/07/22");
        assert!(detail.has_more_characters);
        assert_eq!(detail.characters.len(), 1);
        assert_eq!(detail.characters[0].name, "Luffy");
    }
}
