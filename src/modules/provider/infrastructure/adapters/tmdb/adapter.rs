use async_trait::async_trait;

use super::models::*;
use crate::{
    modules::provider::{
        domain::repositories::CatalogRepository, infrastructure::http_client::RateLimitClient,
    },
    shared::{
        config::ProviderEndpoints,
        domain::value_objects::CatalogFamily,
        errors::UpstreamResult,
    },
};

const CREDITS: &str = "credits";
const PERSON_CREDITS: &str = "tv_credits,movie_credits";

/// TMDB (The Movie Database) REST catalog adapter
pub struct TmdbAdapter {
    http_client: RateLimitClient,
    base_url: String,
    image_base_url: String,
}

impl TmdbAdapter {
    pub fn new(endpoints: &ProviderEndpoints) -> Self {
        Self::with_client(
            RateLimitClient::for_tmdb(
                endpoints.tmdb_api_token.clone(),
                endpoints.upstream_timeout(),
            ),
            endpoints,
        )
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, endpoints: &ProviderEndpoints) -> Self {
        Self {
            http_client,
            base_url: endpoints.tmdb_base_url.trim_end_matches('/').to_string(),
            image_base_url: endpoints.tmdb_image_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Check if a request can be made immediately (for testing and monitoring)
    pub fn can_make_request_now(&self) -> bool {
        self.http_client.can_make_request_now()
    }

    /// Build URL with query parameters
    pub fn build_url_with_params(&self, endpoint: &str, params: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, endpoint);
        for (i, (key, value)) in params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&format!("{}={}", key, urlencoding::encode(value)));
        }
        url
    }

    /// Build full image URL from a TMDB file path
    pub fn build_image_url(&self, file_path: &str, size: &str) -> String {
        format!("{}/{}{}", self.image_base_url, size, file_path)
    }

    async fn listing(
        &self,
        family: CatalogFamily,
        id: u64,
        endpoint: &str,
        page: u32,
        locale: &str,
    ) -> UpstreamResult<TmdbPage> {
        let url = self.build_url_with_params(
            &format!("/{}/{}/{}", family.path_segment(), id, endpoint),
            &[("page", page.to_string()), ("language", locale.to_string())],
        );

        log::info!(
            "TMDB: Getting {} for {} {} (page {}, {})",
            endpoint,
            family,
            id,
            page,
            locale
        );

        let response: TmdbPage = self.http_client.get(&url).await?;
        log::debug!(
            "TMDB: {} {} for {} returned {} of {} results",
            family,
            endpoint,
            id,
            response.results.len(),
            response.total_results
        );
        Ok(response)
    }
}

#[async_trait]
impl CatalogRepository for TmdbAdapter {
    async fn genres(&self, family: CatalogFamily, locale: &str) -> UpstreamResult<Vec<TmdbGenre>> {
        let url = self.build_url_with_params(
            &format!("/genre/{}/list", family.path_segment()),
            &[("language", locale.to_string())],
        );

        log::info!("TMDB: Getting {} genre list ({})", family, locale);

        let response: TmdbGenreList = self.http_client.get(&url).await?;
        Ok(response.genres)
    }

    async fn recommendations(
        &self,
        family: CatalogFamily,
        id: u64,
        page: u32,
        locale: &str,
    ) -> UpstreamResult<TmdbPage> {
        self.listing(family, id, "recommendations", page, locale)
            .await
    }

    async fn similar(
        &self,
        family: CatalogFamily,
        id: u64,
        page: u32,
        locale: &str,
    ) -> UpstreamResult<TmdbPage> {
        self.listing(family, id, "similar", page, locale).await
    }

    async fn search(
        &self,
        family: CatalogFamily,
        query: &str,
        page: u32,
        locale: &str,
        include_adult: bool,
    ) -> UpstreamResult<TmdbPage> {
        let url = self.build_url_with_params(
            &format!("/search/{}", family.path_segment()),
            &[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("language", locale.to_string()),
                ("include_adult", include_adult.to_string()),
            ],
        );

        log::info!("TMDB: Searching {} for '{}' (page {})", family, query, page);

        let response: TmdbPage = self.http_client.get(&url).await?;
        log::info!(
            "TMDB: Found {} {} results for '{}'",
            response.total_results,
            family,
            query
        );
        Ok(response)
    }

    async fn multi_search(
        &self,
        query: &str,
        page: u32,
        locale: &str,
        include_adult: bool,
    ) -> UpstreamResult<TmdbPage> {
        let url = self.build_url_with_params(
            "/search/multi",
            &[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("language", locale.to_string()),
                ("include_adult", include_adult.to_string()),
            ],
        );

        log::info!("TMDB: Multi search for '{}'", query);
        self.http_client.get(&url).await
    }

    async fn tv_detail(&self, id: u64, locale: &str) -> UpstreamResult<TmdbTvDetail> {
        let url = self.build_url_with_params(
            &format!("/tv/{}", id),
            &[
                ("append_to_response", CREDITS.to_string()),
                ("language", locale.to_string()),
            ],
        );

        log::info!("TMDB: Getting TV detail for ID '{}'", id);
        self.http_client.get(&url).await
    }

    async fn movie_detail(&self, id: u64, locale: &str) -> UpstreamResult<TmdbMovieDetail> {
        let url = self.build_url_with_params(
            &format!("/movie/{}", id),
            &[
                ("append_to_response", CREDITS.to_string()),
                ("language", locale.to_string()),
            ],
        );

        log::info!("TMDB: Getting movie detail for ID '{}'", id);
        self.http_client.get(&url).await
    }

    async fn watch_providers(
        &self,
        family: CatalogFamily,
        id: u64,
    ) -> UpstreamResult<TmdbWatchProviders> {
        let url = self.build_url_with_params(
            &format!("/{}/{}/watch/providers", family.path_segment(), id),
            &[],
        );

        log::info!("TMDB: Getting watch providers for {} {}", family, id);
        self.http_client.get(&url).await
    }

    async fn person_detail(&self, id: u64, locale: &str) -> UpstreamResult<TmdbPersonDetail> {
        let url = self.build_url_with_params(
            &format!("/person/{}", id),
            &[
                ("append_to_response", PERSON_CREDITS.to_string()),
                ("language", locale.to_string()),
            ],
        );

        log::info!("TMDB: Getting person detail for ID '{}'", id);
        self.http_client.get(&url).await
    }
}
