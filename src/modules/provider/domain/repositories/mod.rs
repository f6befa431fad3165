mod catalog_repo;
mod media_graph_repo;

pub use catalog_repo::*;
pub use media_graph_repo::*;
