use log::{debug, info, warn};
use std::sync::Once;
use std::time::Instant;

use crate::modules::provider::CacheStats;
use crate::shared::domain::value_objects::Provider;

static INIT: Once = Once::new();

/// Initialize the logging system
///
/// Safe to call more than once; `RUST_LOG` overrides the defaults below.
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .filter_module("content_hub", log::LevelFilter::Debug)
            .filter_module("reqwest", log::LevelFilter::Warn)
            .filter_module("hyper", log::LevelFilter::Warn)
            .filter_module("governor", log::LevelFilter::Warn)
            .format_timestamp_millis()
            .format_target(false)
            .try_init();

        debug!("Logger initialized");
    });
}

/// Structured log lines shared by the resolvers and the HTTP client
pub struct LogContext;

impl LogContext {
    /// One finished upstream round trip
    pub fn upstream_call(provider: Provider, resource: &str, status: u16, elapsed_ms: u64) {
        if (200..300).contains(&status) {
            debug!(
                "Upstream: {} {} -> {} in {}ms",
                provider.display_name(),
                resource,
                status,
                elapsed_ms
            );
        } else {
            warn!(
                "Upstream: {} {} -> {} in {}ms",
                provider.display_name(),
                resource,
                status,
                elapsed_ms
            );
        }
    }

    pub fn search_operation(query: &str, scope: Option<&str>, results: Option<usize>) {
        match (scope, results) {
            (Some(s), Some(r)) => info!("Search: '{}' in {} returned {} results", query, s, r),
            (Some(s), None) => debug!("Search: starting '{}' in {}", query, s),
            (None, Some(r)) => info!("Search: '{}' returned {} results", query, r),
            (None, None) => debug!("Search: starting '{}'", query),
        }
    }

    pub fn cache_summary(stats: &CacheStats) {
        info!(
            "Cache: {} entries, {} in flight, hit rate {:.1}% ({} hits / {} misses), {} loads, {} evictions, {} expired",
            stats.entries_count,
            stats.in_flight,
            stats.hit_rate() * 100.0,
            stats.hits,
            stats.misses,
            stats.loads,
            stats.evictions,
            stats.expired_cleanups
        );
    }
}

/// Wall-clock timer for one operation
pub struct TimedOperation {
    start: Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn finish(self) -> u64 {
        let duration = self.elapsed_ms();
        debug!("Timing: {} took {}ms", self.operation, duration);
        duration
    }
}
