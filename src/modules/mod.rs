pub mod catalog;
pub mod comics;
pub mod detail;
pub mod provider;
pub mod recommendation;
pub mod search;
