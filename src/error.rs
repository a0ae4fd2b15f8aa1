//! Error types for the marketplace client.
//!
//! Query failures are never raised one at a time. Every failure a call runs
//! into is recorded as a [`MarketplaceError`] into a [`QueryErrors`] map keyed
//! by error id, and the whole map is handed back to the caller.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Parameters a query cannot be issued without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingParameter {
    /// The set name
    Set,
    /// The marketplace user name (private sets)
    UserName,
    /// The API key (private sets)
    ApiKey,
}

impl MissingParameter {
    /// Error id recorded for this parameter.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::UserName => "user_name",
            Self::ApiKey => "api_key",
        }
    }
}

impl fmt::Display for MissingParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set => write!(f, "The API \"set\" is a required parameter."),
            Self::UserName => write!(f, "The marketplace \"username\" is a required parameter."),
            Self::ApiKey => write!(f, "The marketplace \"api_key\" is a required parameter."),
        }
    }
}

/// A single failure observed while running a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketplaceError {
    /// A required parameter was empty
    #[error("{0}")]
    MissingParameter(MissingParameter),

    /// The request never produced an HTTP response
    #[error("{0}")]
    Transport(String),

    /// The endpoint answered with a non-2xx status
    #[error("{0}")]
    HttpStatus(u16),

    /// A 2xx body carried an `error` field for the requested set
    #[error("{message}")]
    SetError { set: String, message: String },

    /// A non-2xx body carried an `error` field
    #[error("{0}")]
    Api(String),
}

impl MarketplaceError {
    /// The error id this failure is recorded under.
    pub fn id(&self) -> String {
        match self {
            Self::MissingParameter(param) => param.id().to_string(),
            Self::Transport(_) => "remote_error".to_string(),
            Self::HttpStatus(_) => "http_code".to_string(),
            Self::SetError { set, .. } => format!("error_{}", set),
            Self::Api(_) => "api_error".to_string(),
        }
    }
}

/// Errors collected during a single query, keyed by error id.
///
/// Recording the same id twice keeps the latest message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryErrors {
    errors: BTreeMap<String, String>,
}

impl QueryErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure under its error id.
    pub fn record(&mut self, error: MarketplaceError) {
        self.errors.insert(error.id(), error.to_string());
    }

    /// Move every entry of `other` into this map.
    pub fn merge(&mut self, other: QueryErrors) {
        self.errors.extend(other.errors);
    }

    /// Message recorded under `id`, if any.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.errors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over `(id, message)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> QueryResult<T> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<MarketplaceError> for QueryErrors {
    fn from(error: MarketplaceError) -> Self {
        let mut errors = QueryErrors::new();
        errors.record(error);
        errors
    }
}

impl fmt::Display for QueryErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marketplace query failed")?;
        for (i, (id, message)) in self.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{} ({})", sep, message, id)?;
        }
        Ok(())
    }
}

impl std::error::Error for QueryErrors {}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Failed to load .env file
    #[error("Failed to load .env file: {0}")]
    DotenvError(String),
}

/// Result of a marketplace query: the payload, or every error the call hit.
pub type QueryResult<T> = Result<T, QueryErrors>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
