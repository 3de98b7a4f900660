//! Error kind enumeration for categorizing client errors.

/// Categorization of client errors.
///
/// The kinds fall into the three failure classes a list screen can see:
///
/// | Class                | Kinds                                                  |
/// |----------------------|--------------------------------------------------------|
/// | No response received | `Connection`, `Timeout`, `Transport`                   |
/// | HTTP error status    | `InvalidArgument` .. `Unavailable`                     |
/// | Unusable response    | `InvalidResponse`                                      |
///
/// `Configuration` is raised while assembling a [`Client`](crate::Client),
/// never by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The request was rejected as malformed, or local input could not be
    /// normalized into a request body.
    ///
    /// HTTP: 400 Bad Request (and unmapped 4xx)
    #[error("invalid argument")]
    InvalidArgument,

    /// Authentication is missing or expired.
    ///
    /// HTTP: 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// The caller may not perform this operation.
    ///
    /// HTTP: 403 Forbidden
    #[error("forbidden")]
    Forbidden,

    /// The entity does not exist.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// The write conflicts with the current state of the entity.
    ///
    /// HTTP: 409 Conflict
    #[error("conflict")]
    Conflict,

    /// The server is throttling this client.
    ///
    /// HTTP: 429 Too Many Requests
    #[error("rate limited")]
    RateLimited,

    /// The server failed while handling the request.
    ///
    /// HTTP: 500 Internal Server Error (and unmapped 5xx)
    #[error("internal error")]
    Internal,

    /// The server is temporarily unable to serve requests.
    ///
    /// HTTP: 502, 503
    #[error("service unavailable")]
    Unavailable,

    /// The request did not complete in time.
    ///
    /// HTTP: 504 Gateway Timeout, or the client-side timeout elapsed.
    #[error("timeout")]
    Timeout,

    /// No connection could be established (DNS, TLS handshake, refused).
    #[error("connection error")]
    Connection,

    /// Any other failure below HTTP semantics.
    #[error("transport error")]
    Transport,

    /// A success response whose body could not be decoded.
    #[error("invalid response")]
    InvalidResponse,

    /// Invalid client configuration (bad URL, missing setting).
    #[error("configuration error")]
    Configuration,
}

impl ErrorKind {
    /// Returns `true` if no HTTP response was received.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ifoodapp::ErrorKind;
    ///
    /// assert!(ErrorKind::Connection.is_transport_failure());
    /// assert!(!ErrorKind::NotFound.is_transport_failure());
    /// ```
    #[inline]
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            ErrorKind::Connection | ErrorKind::Timeout | ErrorKind::Transport
        )
    }

    /// Returns `true` if the server answered with a 4xx status.
    #[inline]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidArgument
                | ErrorKind::Unauthorized
                | ErrorKind::Forbidden
                | ErrorKind::NotFound
                | ErrorKind::Conflict
                | ErrorKind::RateLimited
        )
    }

    /// Creates an `ErrorKind` from an HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::RateLimited,
            500 => ErrorKind::Internal,
            502 | 503 => ErrorKind::Unavailable,
            504 => ErrorKind::Timeout,
            _ if (400..500).contains(&status) => ErrorKind::InvalidArgument,
            _ if status >= 500 => ErrorKind::Internal,
            _ => ErrorKind::Transport,
        }
    }
}
