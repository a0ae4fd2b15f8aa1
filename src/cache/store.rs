use serde_json::Value;
use std::time::Duration;

/// Key-value store with per-key expiry.
///
/// Writes are idempotent overwrites, so concurrent writers racing on one key
/// need no coordination beyond what the implementation already provides.
pub trait CacheStore: Send + Sync {
    /// Fetch a live entry.
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`. `None` means the entry never expires.
    fn set(&self, key: &str, value: Value, ttl: Option<Duration>);

    /// Remove `key` if present.
    fn delete(&self, key: &str);
}
