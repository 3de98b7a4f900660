//! Client builder with typestate pattern.

use std::{marker::PhantomData, sync::Arc, time::Duration};

use super::inner::ClientInner;
#[cfg(feature = "rest")]
use crate::transport::RestTransport;
use crate::{
    Client, Error,
    config::{ListConfig, TlsConfig},
    transport::EntityTransport,
};

/// Environment variable read by [`ClientBuilder::from_env`].
pub const API_URL_ENV: &str = "IFOODAPP_API_URL";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Marker type: URL not yet provided.
pub struct NoUrl;

/// Marker type: URL has been provided.
pub struct HasUrl;

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern to ensure the API URL is provided at compile
/// time.
///
/// ## Required Configuration
///
/// - `url()`: The API base URL (the server root; entity paths are
///   `api/<entities>` below it)
///
/// ## Optional Configuration
///
/// - `timeout()`: Request timeout
/// - `tls_config()`: Custom TLS settings
/// - `list_config()`: Default sort and page size for list screens
/// - `insecure()`: Allow plain HTTP and skip certificate checks
/// - `transport()`: Replace the REST transport (tests)
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use ifoodapp::{Client, ListConfig};
///
/// let client = Client::builder()
///     .url("https://ifood.example.com")
///     .list_config(ListConfig::new().with_page_size(50))
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// assert_eq!(client.list_config().page_size, 50);
/// # Ok::<(), ifoodapp::Error>(())
/// ```
pub struct ClientBuilder<UrlState> {
    url: Option<String>,
    tls_config: TlsConfig,
    list_config: ListConfig,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn EntityTransport>>,
    _url_state: PhantomData<UrlState>,
}

impl ClientBuilder<NoUrl> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            url: None,
            tls_config: TlsConfig::default(),
            list_config: ListConfig::default(),
            timeout: None,
            transport: None,
            _url_state: PhantomData,
        }
    }

    /// Creates a builder whose URL comes from `IFOODAPP_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the variable is unset or not
    /// valid Unicode.
    pub fn from_env() -> Result<ClientBuilder<HasUrl>, Error> {
        let url = std::env::var(API_URL_ENV).map_err(|e| {
            Error::configuration(format!("{} is not usable: {}", API_URL_ENV, e))
        })?;
        Ok(Self::new().url(url))
    }
}

impl Default for ClientBuilder<NoUrl> {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder<NoUrl> {
    /// Sets the API base URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// let builder = ifoodapp::Client::builder().url("https://ifood.example.com");
    /// ```
    pub fn url(self, url: impl Into<String>) -> ClientBuilder<HasUrl> {
        ClientBuilder {
            url: Some(url.into()),
            tls_config: self.tls_config,
            list_config: self.list_config,
            timeout: self.timeout,
            transport: self.transport,
            _url_state: PhantomData,
        }
    }
}

impl<U> ClientBuilder<U> {
    /// Sets the TLS configuration.
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Enables insecure mode: plain HTTP is accepted and certificates are
    /// not verified.
    ///
    /// **WARNING**: local development only.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.tls_config.skip_verification = true;
        self
    }

    /// Sets the list defaults handed to list controllers.
    #[must_use]
    pub fn list_config(mut self, config: ListConfig) -> Self {
        self.list_config = config;
        self
    }

    /// Sets the request timeout (default 30 seconds).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses the given transport instead of creating a REST transport.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use ifoodapp::Client;
    /// use ifoodapp::testing::InMemoryTransport;
    ///
    /// let client = Client::builder()
    ///     .url("https://ifood.test")
    ///     .transport(Arc::new(InMemoryTransport::new()))
    ///     .build()?;
    /// assert!(client.transport_type().is_test());
    /// # Ok::<(), ifoodapp::Error>(())
    /// ```
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn EntityTransport>) -> Self {
        self.transport = Some(transport);
        self
    }
}

impl ClientBuilder<HasUrl> {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if:
    /// - The URL is invalid
    /// - The URL is not HTTPS and [`insecure()`](Self::insecure) was not set
    /// - The HTTP client cannot be created (bad CA certificate)
    pub fn build(self) -> Result<Client, Error> {
        let url = self.url.ok_or_else(|| Error::configuration("URL is required"))?;

        let parsed_url = url::Url::parse(&url)
            .map_err(|e| Error::configuration(format!("invalid URL: {}", e)))?;

        if parsed_url.scheme() != "https" && !self.tls_config.skip_verification {
            return Err(Error::configuration(
                "HTTPS is required. Use .insecure() for development with HTTP.",
            ));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let transport = match self.transport {
            Some(transport) => transport,
            None => create_transport(parsed_url, &self.tls_config, timeout)?,
        };
        tracing::debug!(url = %url, transport = %transport.transport_type(), "client built");

        Ok(Client::from_inner(ClientInner {
            url,
            list_config: self.list_config,
            timeout,
            transport,
        }))
    }
}

#[cfg(feature = "rest")]
fn create_transport(
    url: url::Url,
    tls_config: &TlsConfig,
    timeout: Duration,
) -> Result<Arc<dyn EntityTransport>, Error> {
    Ok(Arc::new(RestTransport::new(url, tls_config, timeout)?))
}

#[cfg(not(feature = "rest"))]
fn create_transport(
    _url: url::Url,
    _tls_config: &TlsConfig,
    _timeout: Duration,
) -> Result<Arc<dyn EntityTransport>, Error> {
    Err(Error::configuration(
        "REST transport requested but 'rest' feature is not enabled",
    ))
}
