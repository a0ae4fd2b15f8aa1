use marketplace_client::{CacheStore, TimedCache};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Cache store backed by a real [`TimedCache`] that counts calls per method
/// and remembers the TTL of each write.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockCacheStore {
    inner: TimedCache,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    ttls: Arc<Mutex<HashMap<String, Option<Duration>>>>,
}

#[allow(dead_code)]
impl MockCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &TimedCache {
        &self.inner
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn ttl_of(&self, key: &str) -> Option<Option<Duration>> {
        self.ttls.lock().unwrap().get(key).copied()
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl CacheStore for MockCacheStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.track_call("get");
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) {
        self.track_call("set");
        self.ttls.lock().unwrap().insert(key.to_string(), ttl);
        self.inner.insert(key, value, ttl);
    }

    fn delete(&self, key: &str) {
        self.track_call("delete");
        self.inner.remove(key);
    }
}
