//! Internal client implementation.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ListConfig;
use crate::transport::EntityTransport;

pub(crate) struct ClientInner {
    /// The API base URL.
    pub url: String,

    /// Defaults for list screens created from this client.
    pub list_config: ListConfig,

    /// Request timeout.
    pub timeout: Duration,

    /// Transport for entity requests.
    pub transport: Arc<dyn EntityTransport>,
}
