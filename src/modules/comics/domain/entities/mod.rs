pub mod comic_recommendations;

pub use comic_recommendations::ComicRecommendations;
