//! Transport trait definitions and common types.
//!
//! Every entity operation reduces to one of six HTTP exchanges against
//! `api/<entity-plural>`. Bodies cross this seam as [`serde_json::Value`] so
//! that one transport serves all entity types.

use crate::Error;
use crate::types::ListQuery;

// ============================================================================
// Transport Enum
// ============================================================================

/// Available transport implementations.
///
/// ## Example
///
/// ```rust
/// use ifoodapp::Transport;
///
/// let transport = Transport::Http;
/// assert!(transport.is_http());
/// assert_eq!(transport.to_string(), "HTTP/REST");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// REST over HTTP (default).
    #[default]
    Http,
    /// Scripted responses, for testing without network.
    Mock,
    /// An in-process entity store with server-like paging, for testing.
    InMemory,
}

impl Transport {
    /// Returns `true` if this is HTTP/REST transport.
    pub fn is_http(&self) -> bool {
        matches!(self, Transport::Http)
    }

    /// Returns `true` if this is a test transport.
    pub fn is_test(&self) -> bool {
        matches!(self, Transport::Mock | Transport::InMemory)
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transport::Http => write!(f, "HTTP/REST"),
            Transport::Mock => write!(f, "Mock"),
            Transport::InMemory => write!(f, "InMemory"),
        }
    }
}

// ============================================================================
// Transport Statistics
// ============================================================================

/// Request counters of a transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Requests sent, including failed ones.
    pub requests_sent: u64,
    /// Requests that ended in an error.
    pub requests_failed: u64,
}

impl TransportStats {
    /// Returns the fraction of requests that succeeded, or 1.0 before any
    /// request.
    pub fn success_rate(&self) -> f64 {
        if self.requests_sent == 0 {
            return 1.0;
        }
        let succeeded = self.requests_sent.saturating_sub(self.requests_failed);
        succeeded as f64 / self.requests_sent as f64
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// A collection read, `GET <path>?<query>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// Collection path relative to the API base, e.g. `api/dishes`.
    pub path: String,
    /// Sort and page parameters.
    pub query: ListQuery,
}

impl ListRequest {
    /// Creates a list request.
    pub fn new(path: impl Into<String>, query: ListQuery) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Returns `path?query`, or just `path` when the query is empty.
    pub fn target(&self) -> String {
        let query = self.query.to_query_string();
        if query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, query)
        }
    }
}

/// A successful collection read.
///
/// The pagination headers are passed through raw; interpreting them, and
/// tolerating malformed values, is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResponse {
    /// The response body, expected to be a JSON array.
    pub body: serde_json::Value,
    /// Raw `link` header, if present.
    pub link: Option<String>,
    /// Raw `x-total-count` header, if present.
    pub total_count: Option<String>,
}

impl ListResponse {
    /// Creates a response without pagination headers.
    pub fn new(body: serde_json::Value) -> Self {
        Self {
            body,
            link: None,
            total_count: None,
        }
    }

    /// Sets the raw `link` header.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Sets the raw `x-total-count` header.
    #[must_use]
    pub fn with_total_count(mut self, total_count: impl Into<String>) -> Self {
        self.total_count = Some(total_count.into());
        self
    }
}

// ============================================================================
// Transport Client Trait
// ============================================================================

/// The HTTP exchanges an entity client needs.
///
/// Implementations turn non-2xx statuses into an [`Error`] carrying the
/// status, and failures below HTTP into `Connection`, `Timeout` or
/// `Transport` errors. They never retry.
#[async_trait::async_trait]
pub trait EntityTransport: Send + Sync {
    /// `GET <path>?<query>`.
    async fn list(&self, request: ListRequest) -> Result<ListResponse, Error>;

    /// `GET <path>`.
    async fn get(&self, path: &str) -> Result<serde_json::Value, Error>;

    /// `POST <path>` with a JSON body.
    async fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value, Error>;

    /// `PUT <path>` with a JSON body.
    async fn put(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value, Error>;

    /// `PATCH <path>` with a partial JSON body.
    async fn patch(&self, path: &str, body: serde_json::Value)
    -> Result<serde_json::Value, Error>;

    /// `DELETE <path>`.
    async fn delete(&self, path: &str) -> Result<(), Error>;

    /// Returns which implementation this is.
    fn transport_type(&self) -> Transport;

    /// Returns the request counters.
    fn stats(&self) -> TransportStats;
}
