pub mod adapters;
pub mod cache;
pub mod decorators;
pub mod http_client;

// Re-export commonly used types
pub use decorators::{CachingCatalogRepository, CachingMediaGraphRepository};
pub use http_client::{RateLimitClient, RetryPolicy};
