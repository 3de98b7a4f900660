//! Configuration types for the ifoodapp client.
//!
//! - [`ListConfig`]: defaults for list screens (sort field, page size)
//! - [`TlsConfig`]: TLS settings for the REST transport
//!
//! Client-level settings (base URL, timeout) live on
//! [`ClientBuilder`](crate::ClientBuilder).

mod list;
mod tls;

pub use list::{DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD, ListConfig};
pub use tls::TlsConfig;
