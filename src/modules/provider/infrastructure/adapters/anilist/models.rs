//! AniList GraphQL models
//!
//! Every nested object is optional: the schema allows partial objects and the
//! aggregators default missing pieces instead of failing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Anime,
    Manga,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FuzzyDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl FuzzyDate {
    /// `YYYY/MM/DD`, dropping trailing parts the upstream does not know
    pub fn format_slashed(&self) -> Option<String> {
        let year = self.year?;
        let mut formatted = format!("{:04}", year);
        if let Some(month) = self.month {
            formatted.push_str(&format!("/{:02}", month));
            if let Some(day) = self.day {
                formatted.push_str(&format!("/{:02}", day));
            }
        }
        Some(formatted)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
    pub user_preferred: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MediaCoverImage {
    pub extra_large: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: Option<u32>,
    pub per_page: Option<u32>,
    pub current_page: Option<u32>,
    pub last_page: Option<u32>,
    pub has_next_page: Option<bool>,
}

/// Media reference embedded in relation and recommendation edges
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub title: Option<MediaTitle>,
    pub cover_image: Option<MediaCoverImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MediaRelationConnection {
    #[serde(default)]
    pub nodes: Vec<Option<MediaRef>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationNode {
    pub media_recommendation: Option<MediaRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationConnection {
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub nodes: Vec<Option<RecommendationNode>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CharacterName {
    pub first: Option<String>,
    pub last: Option<String>,
    pub full: Option<String>,
    pub native: Option<String>,
    pub user_preferred: Option<String>,
    #[serde(default)]
    pub alternative: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CharacterImage {
    pub large: Option<String>,
    pub medium: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: Option<u64>,
    pub site_url: Option<String>,
    pub image: Option<CharacterImage>,
    pub name: Option<CharacterName>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CharacterConnection {
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub nodes: Vec<Option<Character>>,
}

// Main Media type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub title: Option<MediaTitle>,
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub is_adult: Option<bool>,
    pub status: Option<String>,
    pub volumes: Option<u32>,
    pub chapters: Option<u32>,
    pub site_url: Option<String>,
    pub cover_image: Option<MediaCoverImage>,
    pub start_date: Option<FuzzyDate>,
    pub average_score: Option<u32>,
    pub popularity: Option<u32>,
    pub characters: Option<CharacterConnection>,
    pub relations: Option<MediaRelationConnection>,
    pub recommendations: Option<RecommendationConnection>,
}

// Response envelopes (the `data` field of a GraphQL response)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MediaResponse {
    #[serde(rename = "Media")]
    pub media: Option<Media>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MediaPage {
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub media: Vec<Option<Media>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PageResponse {
    #[serde(rename = "Page")]
    pub page: Option<MediaPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CharacterResponse {
    #[serde(rename = "Character")]
    pub character: Option<Character>,
}
