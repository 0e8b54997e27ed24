//! In-memory TTL cache for resolved resource handles.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::trace;

use folio_core::constants::{DATA_TTL, DEFAULT_TTL, IMAGE_TTL};
use folio_core::types::ResourceClass;

/// Cache entry with an absolute expiry.
#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    /// `None` when `now + ttl` overflows the clock; such entries never expire.
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now().checked_add(ttl),
        }
    }

    fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

/// Cache configuration.
///
/// TTLs are expressed in milliseconds so the struct can be loaded from
/// JSON or the environment without a duration format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL applied when `set` is called without one
    pub default_ttl_ms: u64,
    /// TTL for image resources
    pub image_ttl_ms: u64,
    /// TTL for data resources
    pub data_ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_ms: saturating_millis(DEFAULT_TTL),
            image_ttl_ms: saturating_millis(IMAGE_TTL),
            data_ttl_ms: saturating_millis(DATA_TTL),
        }
    }
}

/// Milliseconds in `ttl`, saturating at `u64::MAX`.
fn saturating_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)
}

impl CacheConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default TTL.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl_ms = saturating_millis(ttl);
        self
    }

    /// Sets the TTL for image resources.
    pub fn image_ttl(mut self, ttl: Duration) -> Self {
        self.image_ttl_ms = saturating_millis(ttl);
        self
    }

    /// Sets the TTL for data resources.
    pub fn data_ttl(mut self, ttl: Duration) -> Self {
        self.data_ttl_ms = saturating_millis(ttl);
        self
    }

    /// Returns the TTL for a resource class.
    pub fn ttl_for(&self, class: ResourceClass) -> Duration {
        let ms = match class {
            ResourceClass::Image => self.image_ttl_ms,
            ResourceClass::Data => self.data_ttl_ms,
            ResourceClass::Other => self.default_ttl_ms,
        };
        Duration::from_millis(ms)
    }
}

/// In-memory cache keyed by string.
///
/// Thread-safe; every operation takes the lock for its own duration only.
/// Stale entries are treated as absent and removed when next read. There is
/// no background sweep and no capacity bound.
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    config: CacheConfig,
}

impl<V: Clone> TtlCache<V> {
    /// Creates a new cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Returns the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Gets a fresh value by key.
    ///
    /// A stale entry is removed and reported as absent. Reading never
    /// extends an entry's lifetime.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired_at(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        // Re-check under the write lock: a concurrent `set` may have refreshed it.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|e| e.is_expired_at(now)) {
            entries.remove(key);
            trace!(key, "Evicted stale entry");
        }
        None
    }

    /// Returns true if a fresh entry exists for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Caches a value with the default TTL.
    pub fn set(&self, key: &str, value: V) {
        self.set_with_ttl(key, value, Duration::from_millis(self.config.default_ttl_ms));
    }

    /// Caches a value with a custom TTL, overwriting any previous entry.
    ///
    /// A zero TTL stores an entry that is already stale.
    pub fn set_with_ttl(&self, key: &str, value: V, ttl: Duration) {
        self.entries
            .write()
            .insert(key.to_string(), CacheEntry::new(value, ttl));
    }

    /// Caches a value with the TTL configured for its resource class.
    pub fn set_for_class(&self, key: &str, value: V, class: ResourceClass) {
        self.set_with_ttl(key, value, self.config.ttl_for(class));
    }

    /// Removes a cached entry. Removing a missing key is a no-op.
    pub fn delete(&self, key: &str) {
        self.entries.write().remove(key);
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes all expired entries.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();
        self.entries.write().retain(|_, e| !e.is_expired_at(now));
    }

    /// Returns the number of stored entries, including stale ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired()).count();
        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len().saturating_sub(expired),
        }
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub valid_entries: usize,
}
