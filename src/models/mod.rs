//! Data models for marketplace queries.

pub mod payload;
pub mod query;
pub mod set;

pub use query::{CachePolicy, QueryRequest};
pub use set::{MarketplaceSet, UnknownSet, Visibility};
