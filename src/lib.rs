pub mod application;
pub mod modules;
pub mod shared;

pub use application::ContentHub;
pub use modules::{
    catalog::{ContentClassifier, ContentItem, GenreCatalog, GenreTaxonomy},
    comics::ComicRecommendations,
    detail::{CharacterDetail, ComicDetail, Gender, MovieDetail, PersonDetail, TvDetail},
    provider::{CacheKey, CacheStats, ExternalMetadataCache, Loaded},
    recommendation::{RecommendationPage, RecommendationSource},
    search::{BucketPage, SearchAllResponse},
};
pub use shared::{
    config::HubConfig,
    domain::value_objects::{Bucket, CatalogFamily, MediaFamily, Provider},
    errors::{AppError, AppResult, UpstreamError, UpstreamResult},
};
