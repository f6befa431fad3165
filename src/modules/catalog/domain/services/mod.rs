pub mod content_classifier;

pub use content_classifier::ContentClassifier;
