//! HTTP transport for the marketplace API.
//!
//! The client only ever needs a blocking GET. [`Transport`] is the seam for
//! swapping the network out in tests; [`UreqTransport`] is the real thing.

use std::time::{Duration, Instant};
use thiserror::Error;

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Could not connect to the host
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request or response body timed out or broke mid-stream
    #[error("I/O error: {0}")]
    Io(String),

    /// Any other transport-level failure
    #[error("HTTP request failed: {0}")]
    Other(String),
}

/// Blocking HTTP GET.
///
/// Non-2xx statuses must come back as `Ok(HttpResponse)`; `Err` is reserved
/// for requests that produced no response at all.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Create a transport whose requests time out after `timeout_secs`.
    ///
    /// A timeout too large to form a deadline leaves requests unbounded.
    pub fn new(timeout_secs: u64) -> Self {
        let timeout = Duration::from_secs(timeout_secs);
        let mut builder = ureq::AgentBuilder::new();
        if Instant::now().checked_add(timeout).is_some() {
            builder = builder.timeout(timeout);
        }

        Self {
            agent: builder.build(),
        }
    }

    fn read_body(response: ureq::Response) -> Result<HttpResponse, TransportError> {
        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| TransportError::Io(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        match self
            .agent
            .get(url)
            .set("Accept", "application/json")
            .call()
        {
            Ok(response) => Self::read_body(response),
            Err(ureq::Error::Status(_, response)) => Self::read_body(response),
            Err(ureq::Error::Transport(transport)) => Err(match transport.kind() {
                ureq::ErrorKind::ConnectionFailed | ureq::ErrorKind::Dns => {
                    TransportError::ConnectionFailed(transport.to_string())
                }
                ureq::ErrorKind::Io => TransportError::Io(transport.to_string()),
                _ => TransportError::Other(transport.to_string()),
            }),
        }
    }
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}
