//! # ifoodapp
//!
//! Typed REST client and paginated list synchronization for the iFood
//! restaurant-ordering app.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ifoodapp::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), ifoodapp::Error> {
//!     let client = Client::builder()
//!         .url("https://ifood.example.com")
//!         .build()?;
//!
//!     // One controller per list screen
//!     let mut dishes = client.list_controller::<Dish>("/dish");
//!     let outcome = dishes.mount("?sort=price,DESC").await;
//!     if let Some(target) = outcome.navigation() {
//!         println!("navigate to {}", target);
//!     }
//!     for dish in dishes.entities() {
//!         println!("{:?} {:?}", dish.name, dish.price);
//!     }
//!
//!     // Column-header click: toggles price DESC -> ASC and refetches
//!     dishes.sort_by("price").await;
//!
//!     // Infinite scroll
//!     while dishes.state().has_more() {
//!         dishes.load_more().await;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Sort lives in the URL**: list screens persist `?sort=<field>,<ASC|DESC>`
//!   in their location; [`ListSyncController`](list_sync::ListSyncController)
//!   reads it on mount and reports where to navigate after each fetch
//! - **Refresh vs continuation**: a sort change or refresh replaces the list,
//!   a `load_more` appends the next page
//! - **Latest fetch wins**: completions of superseded fetches are discarded
//! - **Errors are state**: a failed fetch leaves the list as it was and
//!   exposes the error; nothing panics
//!
//! ## Features
//!
//! - `rest` (default): Enable the REST transport via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod client;
pub mod config;
pub mod entities;
pub mod error;
pub mod types;

// Transport layer
pub mod transport;

// Screens
pub mod editor;
pub mod form;
pub mod list_sync;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

#[cfg(feature = "rest")]
mod user_agent;

// Re-export main types at crate root for convenience
pub use client::{Client, ClientBuilder, EntityClient};
pub use error::{Error, ErrorKind, Result};

// Re-export config types
pub use config::{ListConfig, TlsConfig};

// Re-export value and entity types
pub use entities::{
    Customer, Dish, Entity, EntityId, Menu, Order, OrderItem, OrderStatus, Payment, PaymentType,
    Restaurant,
};
pub use types::{ListQuery, Page, PageLinks, PageRequest, SortDirection, SortState};

pub use editor::EntityEditor;
pub use list_sync::{FetchOutcome, ListState, ListSyncController};
pub use transport::{EntityTransport, Transport, TransportStats};
