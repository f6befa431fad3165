pub mod caching_repository_decorator;

pub use caching_repository_decorator::{CachingCatalogRepository, CachingMediaGraphRepository};
