pub mod recommendation_resolver;

pub use recommendation_resolver::RecommendationResolver;
