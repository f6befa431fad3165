//! AniList provider adapter
//!
//! GraphQL-based adapter serving comic detail, recommendations, search and
//! character lookups.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{
    modules::provider::{
        domain::repositories::{ComicQuery, ComicSearch, MediaGraphRepository},
        infrastructure::http_client::RateLimitClient,
    },
    shared::{
        config::ProviderEndpoints,
        domain::value_objects::Provider,
        errors::{UpstreamError, UpstreamResult},
    },
};

use super::{models::*, queries::*};

/// AniList provider adapter with GraphQL API
pub struct AniListAdapter {
    http_client: RateLimitClient,
    base_url: String,
}

impl AniListAdapter {
    pub fn new(endpoints: &ProviderEndpoints) -> Self {
        Self::with_client(
            RateLimitClient::for_anilist(endpoints.upstream_timeout()),
            endpoints,
        )
    }

    pub fn with_client(http_client: RateLimitClient, endpoints: &ProviderEndpoints) -> Self {
        Self {
            http_client,
            base_url: endpoints.anilist_base_url.clone(),
        }
    }

    /// Check if a request can be made now (for testing)
    pub fn can_make_request_now(&self) -> bool {
        self.http_client.can_make_request_now()
    }

    /// Make a GraphQL request to AniList API
    async fn make_graphql_request<T>(&self, query: &str, variables: Value) -> UpstreamResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = json!({
            "query": query,
            "variables": variables,
        });

        log::debug!("AniList: GraphQL variables: {}", body["variables"]);

        let graphql_response: Value = self.http_client.post_json(&self.base_url, &body).await?;
        extract_data(graphql_response)
    }
}

/// Unwrap the `data` field of a GraphQL response, classifying `errors`
pub fn extract_data<T>(mut response: Value) -> UpstreamResult<T>
where
    T: serde::de::DeserializeOwned,
{
    if let Some(errors) = response.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let missing = errors
                .iter()
                .any(|e| e.get("status").and_then(Value::as_u64) == Some(404));
            let message = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ");

            if missing {
                return Err(UpstreamError::not_found(Provider::AniList, message));
            }
            log::error!("AniList: GraphQL errors in response: {}", message);
            return Err(UpstreamError::GraphQl {
                provider: Provider::AniList,
                message,
            });
        }
    }

    let data = response
        .get_mut("data")
        .map(Value::take)
        .filter(|d| !d.is_null())
        .ok_or_else(|| {
            UpstreamError::decode(Provider::AniList, "No data field in AniList response")
        })?;

    serde_json::from_value(data).map_err(|e| {
        UpstreamError::decode(
            Provider::AniList,
            format!("Failed to deserialize AniList data: {}", e),
        )
    })
}

#[async_trait]
impl MediaGraphRepository for AniListAdapter {
    async fn comic_detail(&self, query: ComicQuery) -> UpstreamResult<Media> {
        log::info!("AniList: Getting comic detail for ID '{}'", query.media_id);

        let response: MediaResponse = self
            .make_graphql_request(COMIC_DETAIL_QUERY, query.variables())
            .await?;

        response.media.ok_or_else(|| {
            log::info!("AniList: No comic found for ID '{}'", query.media_id);
            UpstreamError::not_found(Provider::AniList, format!("Media {}", query.media_id))
        })
    }

    async fn comic_recommendations(&self, query: ComicQuery) -> UpstreamResult<Media> {
        log::info!(
            "AniList: Getting recommendations for comic '{}' (page {})",
            query.media_id,
            query.page
        );

        let response: MediaResponse = self
            .make_graphql_request(COMIC_RECOMMENDATIONS_QUERY, query.variables())
            .await?;

        response.media.ok_or_else(|| {
            UpstreamError::not_found(Provider::AniList, format!("Media {}", query.media_id))
        })
    }

    async fn comic_search(&self, search: ComicSearch) -> UpstreamResult<MediaPage> {
        log::info!(
            "AniList: Searching comics for '{}' (page {}, perPage {})",
            search.keyword,
            search.page,
            search.per_page
        );

        let response: PageResponse = self
            .make_graphql_request(COMIC_SEARCH_QUERY, search.variables())
            .await?;

        let page = response.page.unwrap_or_default();
        log::info!(
            "AniList: Found {} comics for '{}'",
            page.media.len(),
            search.keyword
        );
        Ok(page)
    }

    async fn character_detail(&self, character_id: u64) -> UpstreamResult<Character> {
        log::info!("AniList: Getting character '{}'", character_id);

        let response: CharacterResponse = self
            .make_graphql_request(
                CHARACTER_DETAIL_QUERY,
                json!({ "characterId": character_id }),
            )
            .await?;

        response.character.ok_or_else(|| {
            log::warn!("AniList: Character '{}' missing from response", character_id);
            UpstreamError::not_found(Provider::AniList, format!("Character {}", character_id))
        })
    }
}
