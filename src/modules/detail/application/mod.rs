pub mod detail_service;

pub use detail_service::DetailService;
