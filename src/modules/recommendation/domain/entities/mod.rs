pub mod recommendation_page;

pub use recommendation_page::{RecommendationPage, RecommendationRequest, RecommendationSource};
