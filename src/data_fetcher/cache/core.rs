use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

use crate::constants::cache::DEFAULT_CAPACITY;

use super::types::{CacheEntry, CacheInfo, CachedValue, Cacheable};

/// Key-value store shared by every repository.
///
/// Absence is never an error: unknown keys, expired entries and type
/// mismatches all read as `None`. Implementations must be safe to call from
/// concurrent tasks.
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Stores `value` under `key`, replacing any previous entry
    async fn set_value(&self, key: &str, value: CachedValue, expiration: Option<Duration>);

    /// Returns the live value for `key`, evicting it first if it has expired
    async fn get_value(&self, key: &str) -> Option<CachedValue>;

    async fn remove(&self, key: &str);

    async fn clear(&self);

    /// True when the key is absent, expired, or older than `max_age`.
    /// Does not evict.
    async fn is_stale(&self, key: &str, max_age: Duration) -> bool;
}

/// Typed access on top of [`CacheService`]
#[async_trait]
pub trait CacheServiceExt: CacheService {
    async fn get<T: Cacheable>(&self, key: &str) -> Option<T> {
        let value = self.get_value(key).await?;
        let kind = value.kind();
        let typed = T::from_cached(value);
        if typed.is_none() {
            debug!("Cache type mismatch: key={}, stored={}", key, kind);
        }
        typed
    }

    async fn set<T: Cacheable>(&self, key: &str, value: T, expiration: Option<Duration>) {
        self.set_value(key, value.into_cached(), expiration).await;
    }
}

impl<C: CacheService + ?Sized> CacheServiceExt for C {}

/// In-memory LRU cache guarded by a single lock.
///
/// Expired entries are dropped lazily when read; nothing sweeps in the
/// background. When full, the least recently used entry is dropped.
pub struct MemoryCache {
    entries: RwLock<LruCache<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Gets the current cache size and capacity for monitoring
    pub async fn stats(&self) -> CacheInfo {
        let entries = self.entries.read().await;
        CacheInfo {
            size: entries.len(),
            capacity: entries.cap().get(),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    #[instrument(skip(self, value), fields(kind = value.kind()))]
    async fn set_value(&self, key: &str, value: CachedValue, expiration: Option<Duration>) {
        let entry = CacheEntry::new(value, expiration);
        let mut entries = self.entries.write().await;
        if let Some((evicted, _)) = entries.push(key.to_string(), entry) {
            if evicted != key {
                debug!("Cache full, evicted least recently used entry: key={}", evicted);
            }
        }
        debug!(
            "Cached value: key={}, expiration={:?}, size={}",
            key,
            expiration,
            entries.len()
        );
    }

    #[instrument(skip(self))]
    async fn get_value(&self, key: &str) -> Option<CachedValue> {
        let mut entries = self.entries.write().await;

        match entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                debug!("Cache hit: key={}, age={:?}", key, entry.age());
                return Some(entry.value.clone());
            }
            Some(_) => {}
            None => {
                debug!("Cache miss: key={}", key);
                return None;
            }
        }

        entries.pop(key);
        debug!("Removed expired cache entry: key={}", key);
        None
    }

    async fn remove(&self, key: &str) {
        let mut entries = self.entries.write().await;
        if entries.pop(key).is_some() {
            debug!("Removed cache entry: key={}", key);
        }
    }

    async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let size = entries.len();
        entries.clear();
        debug!("Cleared cache: removed {} entries", size);
    }

    async fn is_stale(&self, key: &str, max_age: Duration) -> bool {
        let entries = self.entries.read().await;
        let stale = entries
            .peek(key)
            .is_none_or(|entry| entry.is_stale(max_age));
        trace!("Staleness check: key={}, max_age={:?}, stale={}", key, max_age, stale);
        stale
    }
}
