pub mod upstream_payload;

pub use upstream_payload::UpstreamPayload;
