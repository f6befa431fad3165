pub mod application;
pub mod domain;

pub use application::ComicsAggregator;
pub use domain::entities::ComicRecommendations;
