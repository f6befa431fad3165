use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::modules::provider::infrastructure::adapters::anilist::models::{
    Character, Media, MediaPage,
};
use crate::shared::errors::UpstreamResult;

/// Paged lookup against one comic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComicQuery {
    pub media_id: u64,
    pub page: u32,
    pub per_page: u32,
    pub include_adult: bool,
}

impl ComicQuery {
    pub fn new(media_id: u64, page: u32, per_page: u32, include_adult: bool) -> Self {
        Self {
            media_id,
            page,
            per_page,
            include_adult,
        }
    }

    /// GraphQL variables; `isAdult` is only sent when adult entries must be excluded
    pub fn variables(&self) -> Value {
        let mut vars = Map::new();
        vars.insert("mediaId".into(), json!(self.media_id));
        vars.insert("page".into(), json!(self.page));
        vars.insert("perPage".into(), json!(self.per_page));
        exclude_adult(&mut vars, self.include_adult);
        Value::Object(vars)
    }
}

/// Paged comic search
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComicSearch {
    pub keyword: String,
    pub page: u32,
    pub per_page: u32,
    pub include_adult: bool,
}

impl ComicSearch {
    pub fn new(keyword: &str, page: u32, per_page: u32, include_adult: bool) -> Self {
        Self {
            keyword: keyword.to_string(),
            page,
            per_page,
            include_adult,
        }
    }

    pub fn variables(&self) -> Value {
        let mut vars = Map::new();
        vars.insert("search".into(), json!(self.keyword));
        vars.insert("page".into(), json!(self.page));
        vars.insert("perPage".into(), json!(self.per_page));
        exclude_adult(&mut vars, self.include_adult);
        Value::Object(vars)
    }
}

fn exclude_adult(vars: &mut Map<String, Value>, include_adult: bool) {
    if !include_adult {
        vars.insert("isAdult".into(), json!(false));
    }
}

/// GraphQL media operations (comics and characters)
#[async_trait]
pub trait MediaGraphRepository: Send + Sync {
    /// Comic detail plus a page of characters
    async fn comic_detail(&self, query: ComicQuery) -> UpstreamResult<Media>;

    /// Comic relations plus a page of recommendations, in one round trip
    async fn comic_recommendations(&self, query: ComicQuery) -> UpstreamResult<Media>;

    async fn comic_search(&self, search: ComicSearch) -> UpstreamResult<MediaPage>;

    async fn character_detail(&self, character_id: u64) -> UpstreamResult<Character>;
}
