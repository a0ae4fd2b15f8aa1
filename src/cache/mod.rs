//! Caching for decoded API responses.
//!
//! [`CacheStore`] is the seam the client caches through; [`TimedCache`] is the
//! in-process default with per-entry expiry.

pub mod key;
pub mod store;
pub mod timed_cache;

pub use key::transient_key;
pub use store::CacheStore;
pub use timed_cache::TimedCache;
