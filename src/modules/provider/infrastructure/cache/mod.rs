pub mod cache_key;
pub mod metadata_cache;

pub use cache_key::CacheKey;
pub use metadata_cache::{CacheStats, ExternalMetadataCache, Loaded};
