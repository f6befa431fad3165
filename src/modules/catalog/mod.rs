pub mod application;
pub mod domain;

pub use application::GenreCatalog;
pub use domain::{
    entities::{ContentItem, GenreTaxonomy},
    services::ContentClassifier,
};
