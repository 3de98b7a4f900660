//! Transport layer for the ordering API.
//!
//! This module provides the underlying transport implementations:
//!
//! - REST transport (via reqwest) - the default
//! - Mock transport - scripted replies for testing without network
//!
//! [`EntityClient`](crate::client::EntityClient) is written against the
//! [`EntityTransport`] trait, so any of these (or
//! [`InMemoryTransport`](crate::testing::InMemoryTransport)) can back a
//! [`Client`](crate::Client).
//!
//! ## Feature Flags
//!
//! - `rest` (default): Enable REST transport

pub(crate) mod traits;

#[cfg(feature = "rest")]
pub(crate) mod rest;

pub(crate) mod mock;

pub use mock::{Method, MockReply, MockTransport, RecordedRequest};
pub use traits::{
    EntityTransport, ListRequest, ListResponse, Transport, TransportStats,
};

#[cfg(feature = "rest")]
pub use rest::{RestTransport, RestTransportBuilder};
