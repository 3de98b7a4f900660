//! Testing utilities for code built on the ifoodapp client.
//!
//! - [`MockTransport`]: replays scripted replies and records requests
//! - [`InMemoryTransport`]: stores entities and sorts/pages them like the
//!   server
//!
//! Both plug into [`ClientBuilder::transport`](crate::ClientBuilder::transport).
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use ifoodapp::prelude::*;
//! use ifoodapp::testing::InMemoryTransport;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = Arc::new(InMemoryTransport::new());
//! let client = Client::builder()
//!     .url("https://ifood.test")
//!     .transport(store.clone())
//!     .build()
//!     .unwrap();
//!
//! let created = client
//!     .customers()
//!     .create(&Customer::builder().name("Ana").build())
//!     .await
//!     .unwrap();
//! assert_eq!(store.find::<Customer>(created.id.unwrap()), Some(created));
//! # });
//! ```
//!
//! ## MockTransport vs InMemoryTransport
//!
//! | Feature | MockTransport | InMemoryTransport |
//! |---------|---------------|-------------------|
//! | Request recording | ✓ | ✗ |
//! | Failure injection | ✓ | ✗ |
//! | Delayed replies | ✓ | ✗ |
//! | Sorting and paging | ✗ | ✓ |
//! | Best for | Unit tests | Screen-level tests |

mod in_memory;

pub use in_memory::InMemoryTransport;

pub use crate::transport::{Method, MockReply, MockTransport, RecordedRequest};
