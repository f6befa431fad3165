//! Cache-aside store fronting every upstream call
//!
//! Entries expire by TTL (a shorter one for confirmed absences) and are
//! evicted least-recently-used once the entry cap is reached. Concurrent
//! misses on one key share a single spawned load; a waiter that goes away
//! does not cancel it.

use dashmap::{mapref::entry::Entry, DashMap};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::cache_key::CacheKey;
use crate::shared::{
    config::CacheSettings,
    errors::{UpstreamError, UpstreamResult},
};

/// What a loader hands back, and whether it may be stored
#[derive(Debug)]
pub enum Loaded<V> {
    /// Store with the entry TTL
    Fresh(V),
    /// Confirmed absence; stored with the negative TTL and replayed as an error
    Absent(UpstreamError),
    /// Returned to every waiter but never stored
    Uncached(UpstreamResult<V>),
}

impl<V> From<UpstreamResult<V>> for Loaded<V> {
    /// Default policy: values and not-found are cacheable, other failures are not
    fn from(result: UpstreamResult<V>) -> Self {
        match result {
            Ok(value) => Loaded::Fresh(value),
            Err(err) if err.is_not_found() => Loaded::Absent(err),
            Err(err) => Loaded::Uncached(Err(err)),
        }
    }
}

#[derive(Debug, Clone)]
enum Cached<V> {
    Value(V),
    Missing(UpstreamError),
}

impl<V> Cached<V> {
    fn into_result(self) -> UpstreamResult<V> {
        match self {
            Cached::Value(value) => Ok(value),
            Cached::Missing(err) => Err(err),
        }
    }
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: Cached<V>,
    created_at: Instant,
    expires_at: Instant,
    last_used: u64,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub loads: u64,
    pub evictions: u64,
    pub expired_cleanups: u64,
    pub entries_count: usize,
    pub in_flight: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

type SharedLoad<V> = Shared<BoxFuture<'static, UpstreamResult<V>>>;

struct CacheState<V> {
    entries: DashMap<CacheKey, CacheEntry<V>>,
    in_flight: DashMap<CacheKey, (u64, SharedLoad<V>)>,
    default_ttl: Duration,
    negative_ttl: Duration,
    max_entries: usize,
    /// Serializes evict-then-insert so concurrent stores cannot overshoot `max_entries`
    store_lock: Mutex<()>,
    hits: AtomicU64,
    misses: AtomicU64,
    loads: AtomicU64,
    evictions: AtomicU64,
    cleanups: AtomicU64,
    /// Monotonic access counter; orders entries for LRU eviction
    clock: AtomicU64,
}

/// Generic cache-aside wrapper with single-flight loads
pub struct ExternalMetadataCache<V> {
    state: Arc<CacheState<V>>,
}

impl<V> Clone for ExternalMetadataCache<V> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<V> ExternalMetadataCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(default_ttl: Duration, negative_ttl: Duration, max_entries: usize) -> Self {
        Self {
            state: Arc::new(CacheState {
                entries: DashMap::new(),
                in_flight: DashMap::new(),
                default_ttl,
                negative_ttl,
                max_entries: max_entries.max(1),
                store_lock: Mutex::new(()),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
                loads: AtomicU64::new(0),
                evictions: AtomicU64::new(0),
                cleanups: AtomicU64::new(0),
                clock: AtomicU64::new(0),
            }),
        }
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::new(settings.ttl(), settings.negative_ttl(), settings.max_entries)
    }

    pub fn default_ttl(&self) -> Duration {
        self.state.default_ttl
    }

    /// Return the cached value for `key`, or run `loader` once for all concurrent callers
    pub async fn fetch<F, Fut>(&self, key: CacheKey, loader: F) -> UpstreamResult<V>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Loaded<V>> + Send + 'static,
    {
        let ttl = self.state.default_ttl;
        self.fetch_with_ttl(key, ttl, loader).await
    }

    /// Same as [`fetch`](Self::fetch) with an explicit TTL for fresh values
    pub async fn fetch_with_ttl<F, Fut>(
        &self,
        key: CacheKey,
        ttl: Duration,
        loader: F,
    ) -> UpstreamResult<V>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Loaded<V>> + Send + 'static,
    {
        if let Some(hit) = self.state.lookup(&key, true) {
            debug!("Cache hit for key: {}", key);
            return hit;
        }

        let load = match self.state.in_flight.entry(key.clone()) {
            Entry::Occupied(occupied) => {
                debug!("Joining in-flight load for key: {}", key);
                occupied.get().1.clone()
            }
            Entry::Vacant(vacant) => {
                // A load may have landed between the lookup and taking the slot
                if let Some(hit) = self.state.lookup(&key, false) {
                    return hit;
                }
                debug!("Cache miss for key: {}, starting load", key);
                let (load_id, load) = self.spawn_load(key.clone(), ttl, loader);
                vacant.insert((load_id, load.clone()));
                load
            }
        };

        load.await
    }

    fn spawn_load<F, Fut>(&self, key: CacheKey, ttl: Duration, loader: F) -> (u64, SharedLoad<V>)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Loaded<V>> + Send + 'static,
    {
        let load_id = self.state.loads.fetch_add(1, Ordering::Relaxed) + 1;

        let task_state = Arc::clone(&self.state);
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            let outcome = loader().await;
            let result = task_state.store(&task_key, ttl, outcome);
            task_state
                .in_flight
                .remove_if(&task_key, |_, (id, _)| *id == load_id);
            result
        });

        let state = Arc::clone(&self.state);
        let load = async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    state.in_flight.remove_if(&key, |_, (id, _)| *id == load_id);
                    warn!("Cache loader for key {} did not complete: {}", key, e);
                    Err(UpstreamError::Aborted {
                        message: format!("loader for {} failed: {}", key, e),
                    })
                }
            }
        }
        .boxed()
        .shared();

        (load_id, load)
    }

    /// Get current cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.state.hits.load(Ordering::Relaxed),
            misses: self.state.misses.load(Ordering::Relaxed),
            loads: self.state.loads.load(Ordering::Relaxed),
            evictions: self.state.evictions.load(Ordering::Relaxed),
            expired_cleanups: self.state.cleanups.load(Ordering::Relaxed),
            entries_count: self.state.entries.len(),
            in_flight: self.state.in_flight.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.state.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.entries.is_empty()
    }

    /// Whether a live (unexpired) entry exists, without touching recency
    pub fn contains(&self, key: &CacheKey) -> bool {
        let now = Instant::now();
        self.state
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    /// Drop all stored entries; in-flight loads are left to finish
    pub fn clear(&self) {
        self.state.entries.clear();
        info!("Cache cleared");
    }

    /// Remove every expired entry, returning how many were dropped
    pub fn purge_expired(&self) -> usize {
        self.state.purge_expired()
    }

    /// Periodically purge expired entries; stops once the cache is dropped
    pub fn spawn_cleanup_task(&self, every: Duration) -> JoinHandle<()> {
        let weak: Weak<CacheState<V>> = Arc::downgrade(&self.state);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await;
            loop {
                interval.tick().await;
                match weak.upgrade() {
                    Some(state) => {
                        state.purge_expired();
                    }
                    None => break,
                }
            }
        })
    }
}

impl<V> CacheState<V>
where
    V: Clone,
{
    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Live entry lookup; expired entries are removed on the way
    fn lookup(&self, key: &CacheKey, record: bool) -> Option<UpstreamResult<V>> {
        let now = Instant::now();
        {
            if let Some(mut entry) = self.entries.get_mut(key) {
                if !entry.is_expired(now) {
                    entry.last_used = self.tick();
                    if record {
                        self.hits.fetch_add(1, Ordering::Relaxed);
                    }
                    return Some(entry.value.clone().into_result());
                }
            }
        }

        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired(now))
            .is_some()
        {
            debug!("Removed expired cache entry for key: {}", key);
        }
        if record {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        None
    }

    fn store(&self, key: &CacheKey, ttl: Duration, outcome: Loaded<V>) -> UpstreamResult<V> {
        let (cached, ttl) = match outcome {
            Loaded::Fresh(value) => (Cached::Value(value), ttl),
            Loaded::Absent(err) => (Cached::Missing(err), self.negative_ttl),
            Loaded::Uncached(result) => {
                debug!("Not caching outcome for key: {}", key);
                return result;
            }
        };

        let result = cached.clone().into_result();
        {
            let _guard = self
                .store_lock
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());

            if !self.entries.contains_key(key) {
                self.evict_least_recently_used();
            }

            let now = Instant::now();
            self.entries.insert(
                key.clone(),
                CacheEntry {
                    value: cached,
                    created_at: now,
                    expires_at: now + ttl,
                    last_used: self.tick(),
                },
            );
        }

        debug!("Cached key: {} with TTL: {:?}", key, ttl);
        result
    }

    /// Make room for one insert
    fn evict_least_recently_used(&self) {
        while self.entries.len() >= self.max_entries {
            let victim = self
                .entries
                .iter()
                .min_by_key(|entry| (entry.value().last_used, entry.value().created_at))
                .map(|entry| entry.key().clone());

            match victim {
                Some(key) => {
                    if self.entries.remove(&key).is_some() {
                        self.evictions.fetch_add(1, Ordering::Relaxed);
                        debug!("Evicted least recently used entry: {}", key);
                    }
                }
                None => break,
            }
        }
    }

    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            self.cleanups.fetch_add(removed as u64, Ordering::Relaxed);
            debug!("Cleaned up {} expired cache entries", removed);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::domain::value_objects::Provider;

    fn key(id: u32) -> CacheKey {
        CacheKey::new(Provider::Tmdb, "recommendations")
            .locale("ko-KR")
            .page(1)
            .entity(id)
    }

    #[tokio::test]
    async fn test_cache_hit_skips_loader() {
        let cache = ExternalMetadataCache::new(Duration::from_secs(60), Duration::from_secs(5), 10);

        let first = cache.fetch(key(1), || async { Loaded::Fresh(7u32) }).await;
        let second = cache
            .fetch(key(1), || async { Loaded::Fresh(99u32) })
            .await;

        assert_eq!(first, Ok(7));
        assert_eq!(second, Ok(7));

        let stats = cache.stats();
        assert_eq!(stats.loads, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries_count, 1);
        assert_eq!(stats.in_flight, 0);
    }

    #[tokio::test]
    async fn test_uncached_failure_is_not_stored() {
        let cache: ExternalMetadataCache<u32> =
            ExternalMetadataCache::new(Duration::from_secs(60), Duration::from_secs(5), 10);

        let failure = UpstreamError::status(Provider::Tmdb, 500, "boom");
        let failing = failure.clone();
        let result = cache
            .fetch(key(1), move || async move { Loaded::from(Err(failing)) })
            .await;
        assert_eq!(result, Err(failure));
        assert!(cache.is_empty());

        let retried = cache.fetch(key(1), || async { Loaded::Fresh(3) }).await;
        assert_eq!(retried, Ok(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_result_uses_short_ttl() {
        let cache: ExternalMetadataCache<u32> =
            ExternalMetadataCache::new(Duration::from_secs(60), Duration::from_secs(5), 10);
        let missing = UpstreamError::not_found(Provider::Tmdb, "/tv/1/recommendations");

        let err = missing.clone();
        let first = cache
            .fetch(key(1), move || async move { Loaded::from(Err(err)) })
            .await;
        assert_eq!(first, Err(missing.clone()));

        // Replayed from the negative entry
        let second = cache.fetch(key(1), || async { Loaded::Fresh(1) }).await;
        assert_eq!(second, Err(missing));

        tokio::time::advance(Duration::from_secs(6)).await;
        let third = cache.fetch(key(1), || async { Loaded::Fresh(1) }).await;
        assert_eq!(third, Ok(1));
        assert_eq!(cache.stats().loads, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired_removes_only_stale_entries() {
        let cache = ExternalMetadataCache::new(Duration::from_secs(10), Duration::from_secs(1), 10);

        cache.fetch(key(1), || async { Loaded::Fresh(1u32) }).await.unwrap();
        tokio::time::advance(Duration::from_secs(8)).await;
        cache.fetch(key(2), || async { Loaded::Fresh(2u32) }).await.unwrap();
        tokio::time::advance(Duration::from_secs(3)).await;

        assert_eq!(cache.purge_expired(), 1);
        assert!(!cache.contains(&key(1)));
        assert!(cache.contains(&key(2)));
        assert_eq!(cache.stats().expired_cleanups, 1);
    }

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..CacheStats::default()
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
