pub mod application;
pub mod domain;

pub use application::RecommendationResolver;
pub use domain::entities::{RecommendationPage, RecommendationRequest, RecommendationSource};
