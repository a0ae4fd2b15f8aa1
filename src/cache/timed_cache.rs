//! In-process cache with per-entry expiry.
//!
//! This module provides a thread-safe [`CacheStore`] that drops entries once
//! their own TTL has elapsed.

use super::store::CacheStore;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// A cache entry with an optional deadline.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

/// A thread-safe cache of decoded responses with per-entry expiration.
///
/// The cache can be cloned cheaply; clones share the same entries, so one
/// store can back several clients.
#[derive(Clone, Default)]
pub struct TimedCache {
    cache: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl TimedCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value that expires after `ttl`, or never when `ttl` is `None`
    /// or too large to form a deadline.
    ///
    /// If a value with the same key already exists, it will be replaced.
    pub fn insert(&self, key: impl Into<String>, value: Value, ttl: Option<Duration>) {
        let entry = CacheEntry {
            value,
            expires_at: ttl.and_then(|ttl| Instant::now().checked_add(ttl)),
        };

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key.into(), entry);
        }
    }

    /// Get a value from the cache if it exists and hasn't expired.
    pub fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();

        if let Ok(cache) = self.cache.read() {
            if let Some(entry) = cache.get(key) {
                if entry.is_live(now) {
                    return Some(entry.value.clone());
                }
            }
        }

        None
    }

    /// Check if a key exists in the cache and hasn't expired.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove a specific key from the cache.
    pub fn remove(&self, key: &str) {
        if let Ok(mut cache) = self.cache.write() {
            cache.remove(key);
        }
    }

    /// Clear all entries from the cache.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    /// Remove all expired entries from the cache.
    ///
    /// Expired entries are already ignored by `get()`; this only frees memory.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();

        if let Ok(mut cache) = self.cache.write() {
            cache.retain(|_, entry| entry.is_live(now));
        }
    }

    /// Get the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        if let Ok(cache) = self.cache.read() {
            cache.len()
        } else {
            0
        }
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for TimedCache {
    fn get(&self, key: &str) -> Option<Value> {
        TimedCache::get(self, key)
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) {
        self.insert(key, value, ttl);
    }

    fn delete(&self, key: &str) {
        self.remove(key);
    }
}

impl std::fmt::Debug for TimedCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedCache")
            .field("entries", &self.len())
            .finish()
    }
}
