//! Environment-driven configuration
//!
//! Values are read from the process environment (after loading `.env` with
//! dotenvy); anything missing falls back to the defaults below.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::shared::errors::{AppError, AppResult};

/// Upstream endpoints and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEndpoints {
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    #[serde(skip_serializing)]
    pub tmdb_api_token: Option<String>,
    pub anilist_base_url: String,
    pub upstream_timeout_ms: u64,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            tmdb_base_url: "https://api.themoviedb.org/3".to_string(),
            tmdb_image_base_url: "https://image.tmdb.org/t/p".to_string(),
            tmdb_api_token: None,
            anilist_base_url: "https://graphql.anilist.co".to_string(),
            upstream_timeout_ms: 10_000,
        }
    }
}

impl ProviderEndpoints {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}

/// Locales used by the fallback chain and the genre taxonomy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleSettings {
    pub primary: String,
    pub fallback: String,
    pub genre: String,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            primary: "ko-KR".to_string(),
            fallback: "en-US".to_string(),
            genre: "en".to_string(),
        }
    }
}

/// Cache-aside tuning; TTL and capacity are uniform across resources except the taxonomy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: u64,
    pub negative_ttl_secs: u64,
    pub max_entries: usize,
    pub taxonomy_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: 60 * 60,
            negative_ttl_secs: 120,
            max_entries: 1000,
            taxonomy_ttl_secs: 60 * 60,
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn negative_ttl(&self) -> Duration {
        Duration::from_secs(self.negative_ttl_secs)
    }

    pub fn taxonomy_ttl(&self) -> Duration {
        Duration::from_secs(self.taxonomy_ttl_secs)
    }
}

/// Display caps and page sizes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingSettings {
    pub per_main_page: usize,
    pub comics_per_main_page: u32,
    pub comics_per_more_page: u32,
    pub characters_per_page: u32,
    pub autocomplete_count: usize,
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            per_main_page: 6,
            comics_per_main_page: 6,
            comics_per_more_page: 20,
            characters_per_page: 12,
            autocomplete_count: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubConfig {
    pub endpoints: ProviderEndpoints,
    pub locales: LocaleSettings,
    pub cache: CacheSettings,
    pub paging: PagingSettings,
}

impl HubConfig {
    /// Load `.env` (if present) and read settings from the process environment
    pub fn from_env() -> AppResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {}", e);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = HubConfig::default();
        let text = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let endpoints = &mut config.endpoints;
        if let Some(url) = text("TMDB_BASE_URL") {
            endpoints.tmdb_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = text("TMDB_IMAGE_BASE_URL") {
            endpoints.tmdb_image_base_url = url.trim_end_matches('/').to_string();
        }
        endpoints.tmdb_api_token = text("TMDB_API_TOKEN");
        if let Some(url) = text("ANILIST_BASE_URL") {
            endpoints.anilist_base_url = url;
        }
        parse_into(&lookup, "CONTENT_HUB_UPSTREAM_TIMEOUT_MS", &mut endpoints.upstream_timeout_ms)?;

        let locales = &mut config.locales;
        if let Some(locale) = text("CONTENT_HUB_PRIMARY_LOCALE") {
            locales.primary = locale;
        }
        if let Some(locale) = text("CONTENT_HUB_FALLBACK_LOCALE") {
            locales.fallback = locale;
        }
        if let Some(locale) = text("CONTENT_HUB_GENRE_LOCALE") {
            locales.genre = locale;
        }

        let cache = &mut config.cache;
        parse_into(&lookup, "CONTENT_HUB_CACHE_TTL_SECS", &mut cache.ttl_secs)?;
        parse_into(&lookup, "CONTENT_HUB_CACHE_NEGATIVE_TTL_SECS", &mut cache.negative_ttl_secs)?;
        parse_into(&lookup, "CONTENT_HUB_CACHE_MAX_ENTRIES", &mut cache.max_entries)?;
        parse_into(&lookup, "CONTENT_HUB_TAXONOMY_TTL_SECS", &mut cache.taxonomy_ttl_secs)?;

        let paging = &mut config.paging;
        parse_into(&lookup, "CONTENT_HUB_PER_MAIN_PAGE", &mut paging.per_main_page)?;
        parse_into(&lookup, "CONTENT_HUB_COMICS_PER_MAIN_PAGE", &mut paging.comics_per_main_page)?;
        parse_into(&lookup, "CONTENT_HUB_COMICS_PER_MORE_PAGE", &mut paging.comics_per_more_page)?;
        parse_into(&lookup, "CONTENT_HUB_CHARACTERS_PER_PAGE", &mut paging.characters_per_page)?;
        parse_into(&lookup, "CONTENT_HUB_AUTOCOMPLETE_COUNT", &mut paging.autocomplete_count)?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.cache.max_entries == 0 {
            return Err(AppError::ConfigurationError(
                "CONTENT_HUB_CACHE_MAX_ENTRIES must be at least 1".to_string(),
            ));
        }
        if self.endpoints.upstream_timeout_ms == 0 {
            return Err(AppError::ConfigurationError(
                "CONTENT_HUB_UPSTREAM_TIMEOUT_MS must be positive".to_string(),
            ));
        }
        if self.paging.per_main_page == 0 || self.paging.comics_per_more_page == 0 {
            return Err(AppError::ConfigurationError(
                "page sizes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_into<F, T>(lookup: &F, key: &str, target: &mut T) -> AppResult<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) {
        *target = raw.trim().parse::<T>().map_err(|e| {
            AppError::ConfigurationError(format!("{} has invalid value '{}': {}", key, raw, e))
        })?;
    }
    Ok(())
}
