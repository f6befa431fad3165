pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use domain::{
    entities::UpstreamPayload,
    repositories::{CatalogRepository, ComicQuery, ComicSearch, MediaGraphRepository},
};
pub use infrastructure::{
    adapters::{AniListAdapter, TmdbAdapter},
    cache::{CacheKey, CacheStats, ExternalMetadataCache, Loaded},
    decorators::{CachingCatalogRepository, CachingMediaGraphRepository},
    http_client::RateLimitClient,
};
