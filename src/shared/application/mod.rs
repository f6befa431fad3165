/// Shared application layer patterns
///
/// Paging primitives used by every resolver that talks to a paged upstream.
pub mod pagination;

pub use pagination::*;
