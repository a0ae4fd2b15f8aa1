//! Marketplace Client - a blocking client for the marketplace query API.
//!
//! Queries are grouped into named *sets* (`releases`, `item`, `vitals`, ...).
//! Public sets need nothing but the set name and optional scope data; private
//! sets also need a user name and API key. Decoded responses can be cached
//! under a time-to-live.
//!
//! # Architecture
//!
//! - **client**: the query client and its request/cache path
//! - **models**: the set catalog, cache policies and payload helpers
//! - **endpoint**: request URL construction
//! - **transport**: the HTTP seam and its `ureq` implementation
//! - **cache**: the cache store seam, key derivation and in-process store
//! - **error**: per-call error maps and configuration errors
//! - **config**: configuration from environment variables
//! - **metrics**: request and cache counters
//!
//! ```no_run
//! use marketplace_client::{CachePolicy, ClientConfig, MarketplaceClient};
//!
//! let client = MarketplaceClient::new(&ClientConfig::default());
//! match client.query_public("releases", "", CachePolicy::public_default()) {
//!     Ok(Some(releases)) => println!("{}", releases),
//!     Ok(None) => println!("no releases"),
//!     Err(errors) => eprintln!("{}", errors),
//! }
//! ```

// Re-export commonly used types
pub mod cache;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod metrics;
pub mod models;
pub mod transport;

pub use cache::{CacheStore, TimedCache};
pub use client::MarketplaceClient;
pub use config::ClientConfig;
pub use endpoint::ApiUrl;
pub use error::{ConfigError, MarketplaceError, MissingParameter, QueryErrors, QueryResult};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{CachePolicy, MarketplaceSet, QueryRequest, UnknownSet, Visibility};
pub use transport::{HttpResponse, Transport, TransportError, UreqTransport};
