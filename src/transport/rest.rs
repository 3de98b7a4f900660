//! REST transport implementation using reqwest.
//!
//! This module provides the HTTP transport for entity requests, including
//! extraction of the `link` and `x-total-count` pagination headers on
//! collection reads.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{ACCEPT, HeaderMap, LINK};
use url::Url;

use crate::Error;
use crate::config::TlsConfig;
use crate::error::ErrorKind;
use crate::transport::traits::{
    EntityTransport, ListRequest, ListResponse, Transport, TransportStats,
};
use crate::user_agent;

/// Response header carrying the total number of entities across pages.
pub(crate) const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Default request timeout.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// REST Transport
// ============================================================================

/// REST transport using reqwest.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    base_url: Url,
    stats: Arc<RwLock<TransportStats>>,
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestTransport {
    /// Creates a new REST transport builder.
    pub fn builder() -> RestTransportBuilder {
        RestTransportBuilder::new()
    }

    /// Creates a new REST transport with the given configuration.
    pub fn new(base_url: Url, tls_config: &TlsConfig, timeout: Duration) -> Result<Self, Error> {
        let mut client_builder = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent::user_agent());

        if tls_config.skip_verification {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        if let Some(pem) = tls_config.load_ca_pem()? {
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                Error::new(
                    ErrorKind::Configuration,
                    format!("invalid CA certificate: {}", e),
                )
            })?;
            client_builder = client_builder.add_root_certificate(cert);
        }

        let client = client_builder.build().map_err(|e| {
            Error::new(
                ErrorKind::Configuration,
                format!("failed to create HTTP client: {}", e),
            )
        })?;

        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
            stats: Arc::new(RwLock::new(TransportStats::default())),
        })
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path.trim_start_matches('/')).map_err(|e| {
            Error::new(
                ErrorKind::Configuration,
                format!("invalid URL path {:?}: {}", path, e),
            )
        })
    }

    /// Sends a request and counts it.
    ///
    /// Requests with a body get their `Content-Type` from `.json()`.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        let result = request.header(ACCEPT, "application/json").send().await;

        let mut stats = self.stats.write();
        stats.requests_sent += 1;
        match result {
            Ok(response) => {
                if !response.status().is_success() {
                    stats.requests_failed += 1;
                }
                Ok(response)
            },
            Err(e) => {
                stats.requests_failed += 1;
                Err(map_reqwest_error(e))
            },
        }
    }

    /// Sends a request whose success response carries a JSON body.
    async fn exchange(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, Error> {
        let response = self.send(request).await?;
        handle_response(response).await
    }
}

/// Makes `base` a directory URL, so that joins append to its path.
fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

/// Reads a header as text. Non-UTF-8 values are kept lossily so that the
/// caller can still report them.
fn header_text(headers: &HeaderMap, name: impl reqwest::header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

/// Handles a response and parses its JSON body.
async fn handle_response(response: reqwest::Response) -> Result<serde_json::Value, Error> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(map_status_error(status.as_u16(), &error_text));
    }

    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    if bytes.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| {
        Error::new(
            ErrorKind::InvalidResponse,
            format!("failed to parse response: {}", e),
        )
        .with_status(status.as_u16())
    })
}

#[async_trait::async_trait]
impl EntityTransport for RestTransport {
    async fn list(&self, request: ListRequest) -> Result<ListResponse, Error> {
        let mut url = self.url(&request.path)?;
        let query = request.query.to_query_string();
        if !query.is_empty() {
            url.set_query(Some(&query));
        }

        tracing::debug!(url = %url, "GET collection");
        let response = self.send(self.client.get(url)).await?;

        let link = header_text(response.headers(), LINK);
        let total_count = header_text(response.headers(), TOTAL_COUNT_HEADER);
        let body = handle_response(response).await?;

        Ok(ListResponse {
            body,
            link,
            total_count,
        })
    }

    async fn get(&self, path: &str) -> Result<serde_json::Value, Error> {
        let url = self.url(path)?;
        tracing::debug!(url = %url, "GET");
        self.exchange(self.client.get(url)).await
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value, Error> {
        let url = self.url(path)?;
        tracing::debug!(url = %url, "POST");
        self.exchange(self.client.post(url).json(&body)).await
    }

    async fn put(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value, Error> {
        let url = self.url(path)?;
        tracing::debug!(url = %url, "PUT");
        self.exchange(self.client.put(url).json(&body)).await
    }

    async fn patch(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, Error> {
        let url = self.url(path)?;
        tracing::debug!(url = %url, "PATCH");
        self.exchange(self.client.patch(url).json(&body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        tracing::debug!(url = %url, "DELETE");
        let response = self.send(self.client.delete(url)).await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(map_status_error(status.as_u16(), &error_text));
        }
        Ok(())
    }

    fn transport_type(&self) -> Transport {
        Transport::Http
    }

    fn stats(&self) -> TransportStats {
        *self.stats.read()
    }
}

// ============================================================================
// REST Transport Builder
// ============================================================================

/// Builder for REST transport.
pub struct RestTransportBuilder {
    base_url: Option<Url>,
    tls_config: TlsConfig,
    timeout: Duration,
}

impl RestTransportBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            tls_config: TlsConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, Error> {
        self.base_url = Some(Url::parse(url.as_ref()).map_err(|e| {
            Error::new(ErrorKind::Configuration, format!("invalid base URL: {}", e))
        })?);
        Ok(self)
    }

    /// Sets the TLS configuration.
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the REST transport.
    pub fn build(self) -> Result<RestTransport, Error> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::new(ErrorKind::Configuration, "base URL is required"))?;

        RestTransport::new(base_url, &self.tls_config, self.timeout)
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Maps reqwest errors to crate errors.
fn map_reqwest_error(e: reqwest::Error) -> Error {
    let error = if e.is_timeout() {
        Error::new(ErrorKind::Timeout, format!("request timed out: {}", e))
    } else if e.is_connect() {
        Error::new(ErrorKind::Connection, format!("connection failed: {}", e))
    } else if e.is_decode() {
        Error::new(
            ErrorKind::InvalidResponse,
            format!("failed to read response: {}", e),
        )
    } else {
        Error::new(ErrorKind::Transport, format!("HTTP error: {}", e))
    };
    error.with_source(e)
}

/// Maps an HTTP error status to a crate error.
///
/// Problem documents (`{"title": .., "detail": ..}`) contribute their most
/// specific message; other bodies are used verbatim.
fn map_status_error(status: u16, body: &str) -> Error {
    let message = if body.is_empty() {
        format!("HTTP {}", status)
    } else if let Ok(problem) = serde_json::from_str::<serde_json::Value>(body) {
        ["detail", "title", "message", "error"]
            .iter()
            .find_map(|key| problem.get(*key).and_then(|v| v.as_str()))
            .unwrap_or(body)
            .to_string()
    } else {
        body.to_string()
    };

    Error::from_status(status, message)
}

// ============================================================================
// Tests
// ============================================================================
