use super::set::{MarketplaceSet, Visibility};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default cache lifetime for query results, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Whether and for how long a query result is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    pub enabled: bool,
    /// Entry lifetime in seconds; 0 keeps the entry until it is evicted.
    pub ttl_secs: u64,
}

impl CachePolicy {
    /// Cache for `ttl_secs` seconds.
    pub fn cached(ttl_secs: u64) -> Self {
        Self {
            enabled: true,
            ttl_secs,
        }
    }

    /// Always go to the network.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }

    /// Default for public sets: cached for five minutes.
    pub fn public_default() -> Self {
        Self::cached(DEFAULT_TTL_SECS)
    }

    /// Default for private sets: not cached.
    pub fn private_default() -> Self {
        Self::disabled()
    }

    /// Default policy for sets of the given visibility.
    pub fn for_visibility(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Public => Self::public_default(),
            Visibility::Private => Self::private_default(),
        }
    }

    /// TTL handed to the cache store.
    pub fn ttl(&self) -> Option<Duration> {
        match self.ttl_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::public_default()
    }
}

/// A fully described query against one set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub set: String,
    #[serde(default)]
    pub scope: String,
    pub visibility: Visibility,
    pub cache: CachePolicy,
}

impl QueryRequest {
    /// Request for a catalog set with its visibility's default cache policy.
    pub fn new(set: MarketplaceSet, scope: impl Into<String>) -> Self {
        let visibility = set.visibility();
        Self {
            set: set.as_str().to_string(),
            scope: scope.into(),
            visibility,
            cache: CachePolicy::for_visibility(visibility),
        }
    }

    /// Replace the cache policy.
    pub fn with_cache(mut self, cache: CachePolicy) -> Self {
        self.cache = cache;
        self
    }
}
