pub mod bucket;
pub mod media_family;
pub mod provider;

pub use bucket::Bucket;
pub use media_family::{CatalogFamily, MediaFamily};
pub use provider::Provider;
