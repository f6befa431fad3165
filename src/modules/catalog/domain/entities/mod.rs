pub mod content_item;
pub mod genre_taxonomy;

pub use content_item::ContentItem;
pub use genre_taxonomy::GenreTaxonomy;
