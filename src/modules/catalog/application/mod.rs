pub mod genre_catalog;

pub use genre_catalog::GenreCatalog;
