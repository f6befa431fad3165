pub mod hub_config;

pub use hub_config::{CacheSettings, HubConfig, LocaleSettings, PagingSettings, ProviderEndpoints};
