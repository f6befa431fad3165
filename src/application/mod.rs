pub mod content_hub;

pub use content_hub::ContentHub;
