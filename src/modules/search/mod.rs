pub mod application;
pub mod domain;

pub use application::SearchAggregator;
pub use domain::entities::{BucketPage, SearchAllResponse};
