//! HTTP client for the marketplace query API.
//!
//! Every query goes through one of two paths: [`MarketplaceClient::query_public`]
//! for open sets and [`MarketplaceClient::query_private`] for sets that need
//! account credentials. Both build the request URL, optionally consult the
//! cache, detect errors, and return the sub-document addressed by the set name.

use crate::cache::key::{private_key, public_key};
use crate::cache::{transient_key, CacheStore, TimedCache};
use crate::config::ClientConfig;
use crate::endpoint::ApiUrl;
use crate::error::{MarketplaceError, MissingParameter, QueryErrors, QueryResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::payload::{decode_body, error_message, extract_set, is_truthy};
use crate::models::{CachePolicy, MarketplaceSet, QueryRequest, Visibility};
use crate::transport::{Transport, UreqTransport};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

/// Client for the marketplace public and private query sets.
///
/// Errors are returned per call and never stored on the client, so one
/// instance can serve any number of queries.
#[derive(Clone)]
pub struct MarketplaceClient {
    /// Base URL for the marketplace API
    base_url: String,

    /// Default user for private sets
    user_name: String,

    /// API key for private sets
    api_key: String,

    /// Cache TTL applied by the default cache policies
    default_ttl_secs: u64,

    transport: Arc<dyn Transport>,

    cache: Arc<dyn CacheStore>,

    /// Metrics collector
    metrics: Metrics,
}

impl MarketplaceClient {
    /// Create a client from configuration, with a `ureq` transport and an
    /// in-process cache.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
            user_name: config.user_name.clone(),
            api_key: config.api_key.clone(),
            default_ttl_secs: config.cache_ttl_secs,
            transport: Arc::new(UreqTransport::new(config.request_timeout)),
            cache: Arc::new(TimedCache::new()),
            metrics: Metrics::new(),
        }
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(&ClientConfig::new(base_url))
    }

    /// Replace the HTTP transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the cache store.
    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = cache;
        self
    }

    pub fn set_user_name(&mut self, user_name: impl Into<String>) {
        self.user_name = user_name.into();
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Cache policy used when a caller does not pick one.
    ///
    /// Public sets are cached for the configured TTL; private sets are not
    /// cached.
    pub fn default_policy(&self, visibility: Visibility) -> CachePolicy {
        match visibility {
            Visibility::Public => CachePolicy::cached(self.default_ttl_secs),
            Visibility::Private => CachePolicy {
                enabled: false,
                ttl_secs: self.default_ttl_secs,
            },
        }
    }

    // ========================= Queries =========================

    /// Query a catalog set, routing private sets through the configured user.
    pub fn query(
        &self,
        set: MarketplaceSet,
        scope: &str,
        cache: Option<CachePolicy>,
    ) -> QueryResult<Option<Value>> {
        let visibility = set.visibility();
        let cache = cache.unwrap_or_else(|| self.default_policy(visibility));
        match visibility {
            Visibility::Public => self.query_public(set.as_str(), scope, cache),
            Visibility::Private => self.query_private(set.as_str(), "", scope, cache),
        }
    }

    /// Run a fully described request.
    pub fn execute(&self, request: &QueryRequest) -> QueryResult<Option<Value>> {
        match request.visibility {
            Visibility::Public => self.query_public(&request.set, &request.scope, request.cache),
            Visibility::Private => {
                self.query_private(&request.set, "", &request.scope, request.cache)
            }
        }
    }

    /// Query a public set.
    ///
    /// Returns the sub-document stored under `set` in the response, `None`
    /// when the response has no such field, or every error the call ran into.
    pub fn query_public(
        &self,
        set: &str,
        scope: &str,
        cache: CachePolicy,
    ) -> QueryResult<Option<Value>> {
        if set.is_empty() {
            return Err(MarketplaceError::MissingParameter(MissingParameter::Set).into());
        }

        let url = ApiUrl::public(&self.base_url, set, scope);
        let key = public_key(set, scope);
        self.run(set, &key, &url, cache)
    }

    /// Query a private set.
    ///
    /// An empty `user` falls back to the configured user name. All missing
    /// parameters are reported together and no request is made while any is
    /// missing.
    pub fn query_private(
        &self,
        set: &str,
        user: &str,
        scope: &str,
        cache: CachePolicy,
    ) -> QueryResult<Option<Value>> {
        let user = if user.is_empty() {
            self.user_name.as_str()
        } else {
            user
        };

        let mut errors = QueryErrors::new();
        if set.is_empty() {
            errors.record(MarketplaceError::MissingParameter(MissingParameter::Set));
        }
        if user.is_empty() {
            errors.record(MarketplaceError::MissingParameter(MissingParameter::UserName));
        }
        if self.api_key.is_empty() {
            errors.record(MarketplaceError::MissingParameter(MissingParameter::ApiKey));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let url = ApiUrl::private(&self.base_url, user, &self.api_key, set, scope);
        let key = private_key(user, &self.api_key, set, scope);
        self.run(set, &key, &url, cache)
    }

    /// Drop the cached result of a public query.
    pub fn invalidate(&self, set: &str, scope: &str) {
        self.cache.delete(&public_key(set, scope));
    }

    /// Drop the cached result of a private query.
    pub fn invalidate_private(&self, set: &str, user: &str, scope: &str) {
        let user = if user.is_empty() {
            self.user_name.as_str()
        } else {
            user
        };
        self.cache.delete(&private_key(user, &self.api_key, set, scope));
    }

    fn run(
        &self,
        set: &str,
        key: &str,
        url: &ApiUrl,
        cache: CachePolicy,
    ) -> QueryResult<Option<Value>> {
        let fetched = if cache.enabled {
            self.cache_get_or_populate(key, url.as_str(), cache.ttl_secs)
        } else {
            self.transport_call(url.as_str())
        };

        let mut errors = QueryErrors::new();
        let payload = fetched.unwrap_or_else(|e| {
            errors.merge(e);
            Value::Null
        });

        if let Some(message) = error_message(&payload) {
            errors.record(MarketplaceError::SetError {
                set: set.to_string(),
                message,
            });
        }

        if !errors.is_empty() {
            tracing::info!("Query for {} failed, evicting cache entry {}", set, key);
            self.cache.delete(key);
            return Err(errors);
        }

        Ok(extract_set(payload, set))
    }

    // ========================= Transport and cache =========================

    /// Perform a GET and decode the body.
    ///
    /// An empty URL is a no-op returning `null`. A 2xx body that isn't JSON
    /// also decodes to `null`.
    pub fn transport_call(&self, url: &str) -> QueryResult<Value> {
        if url.is_empty() {
            return Ok(Value::Null);
        }

        let timer = HttpTimer::new(self.metrics.clone());
        tracing::debug!("GET {}", self.redact(url));

        let response = match self.transport.get(url) {
            Ok(response) => response,
            Err(e) => {
                timer.complete_with_error();
                tracing::warn!("GET {} - Transport error: {}", self.redact(url), e);
                return Err(MarketplaceError::Transport(e.to_string()).into());
            }
        };

        let payload = decode_body(&response.body);

        if response.is_success() {
            timer.complete();
            tracing::debug!("GET {} - Success (status: {})", self.redact(url), response.status);
            return Ok(payload);
        }

        timer.complete_with_error();
        tracing::warn!("GET {} - Error status: {}", self.redact(url), response.status);

        let mut errors = QueryErrors::from(MarketplaceError::HttpStatus(response.status));
        if let Some(message) = error_message(&payload) {
            errors.record(MarketplaceError::Api(message));
        }
        Err(errors)
    }

    /// Return the cached payload for `key`, or fetch `url` and cache it.
    ///
    /// The key is sanitized first. Only truthy payloads are stored, so a
    /// failed or empty response is fetched again on the next call. A
    /// `ttl_secs` of 0 stores the entry without expiry.
    pub fn cache_get_or_populate(
        &self,
        key: &str,
        url: &str,
        ttl_secs: u64,
    ) -> QueryResult<Value> {
        let key = transient_key(key);
        if key.is_empty() || url.is_empty() {
            return Ok(Value::Null);
        }

        if let Some(cached) = self.cache.get(&key) {
            self.metrics.record_cache_lookup(true);
            tracing::debug!("Cache hit for {}", key);
            return Ok(cached);
        }
        self.metrics.record_cache_lookup(false);
        tracing::debug!("Cache miss for {}", key);

        let fetched = self.transport_call(url)?;
        if is_truthy(&fetched) {
            self.cache
                .set(&key, fetched.clone(), CachePolicy::cached(ttl_secs).ttl());
            self.metrics.record_cache_write();
        }

        Ok(fetched)
    }

    /// The URL with the API key masked, for logging.
    fn redact<'a>(&self, url: &'a str) -> Cow<'a, str> {
        if self.api_key.is_empty() {
            Cow::Borrowed(url)
        } else {
            Cow::Owned(url.replace(self.api_key.as_str(), "***"))
        }
    }
}

impl std::fmt::Debug for MarketplaceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketplaceClient")
            .field("base_url", &self.base_url)
            .field("user_name", &self.user_name)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("default_ttl_secs", &self.default_ttl_secs)
            .finish_non_exhaustive()
    }
}
