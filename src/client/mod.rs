//! Client types for the ordering API.
//!
//! - [`Client`]: top-level client, owns the transport and list defaults
//! - [`EntityClient`]: typed CRUD and list access to one entity type
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ifoodapp::prelude::*;
//!
//! # async fn run() -> std::result::Result<(), ifoodapp::Error> {
//! let client = Client::builder()
//!     .url("https://ifood.example.com")
//!     .build()?;
//!
//! let page = client
//!     .dishes()
//!     .list(ListQuery::sorted(SortState::new("price", SortDirection::Desc)))
//!     .await?;
//! println!("{} of {} dishes", page.len(), page.total_count);
//! # Ok(())
//! # }
//! ```

mod builder;
mod entity;
mod inner;

pub use builder::{API_URL_ENV, ClientBuilder, HasUrl, NoUrl};
pub use entity::EntityClient;

use std::sync::Arc;
use std::time::Duration;

use crate::config::ListConfig;
use crate::editor::EntityEditor;
use crate::entities::{Customer, Dish, Entity, Menu, Order, OrderItem, Payment, Restaurant};
use crate::list_sync::ListSyncController;
use crate::transport::{EntityTransport, Transport, TransportStats};

/// The ordering API client.
///
/// Create a client using [`Client::builder()`], then get an
/// [`EntityClient`] per entity type, or a list controller / editor for a
/// screen.
///
/// ## Thread Safety
///
/// `Client` is `Clone` and thread-safe. Clones share one transport and
/// its connection pool.
#[derive(Clone)]
pub struct Client {
    inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    ///
    /// The builder uses the typestate pattern to ensure the URL is provided
    /// at compile time.
    pub fn builder() -> ClientBuilder<NoUrl> {
        ClientBuilder::new()
    }

    /// Returns typed access to entity `T`.
    pub fn entities<T: Entity>(&self) -> EntityClient<T> {
        EntityClient::new(self.clone())
    }

    /// Returns a list controller for entity `T`, configured with this
    /// client's [`ListConfig`].
    ///
    /// `path` is the list screen's own path (e.g. `/dish`), used to build
    /// navigation targets.
    pub fn list_controller<T: Entity>(&self, path: impl Into<String>) -> ListSyncController<T> {
        ListSyncController::new(self.entities(), self.inner.list_config.clone(), path)
    }

    /// Returns an editor for entity `T`.
    pub fn editor<T: Entity>(&self) -> EntityEditor<T> {
        EntityEditor::new(self.entities())
    }

    /// Returns access to customers.
    pub fn customers(&self) -> EntityClient<Customer> {
        self.entities()
    }

    /// Returns access to restaurants.
    pub fn restaurants(&self) -> EntityClient<Restaurant> {
        self.entities()
    }

    /// Returns access to menus.
    pub fn menus(&self) -> EntityClient<Menu> {
        self.entities()
    }

    /// Returns access to dishes.
    pub fn dishes(&self) -> EntityClient<Dish> {
        self.entities()
    }

    /// Returns access to orders.
    pub fn orders(&self) -> EntityClient<Order> {
        self.entities()
    }

    /// Returns access to order items.
    pub fn order_items(&self) -> EntityClient<OrderItem> {
        self.entities()
    }

    /// Returns access to payments.
    pub fn payments(&self) -> EntityClient<Payment> {
        self.entities()
    }

    /// Returns the base URL of the client.
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Returns the list defaults.
    pub fn list_config(&self) -> &ListConfig {
        &self.inner.list_config
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Returns which transport backs this client.
    pub fn transport_type(&self) -> Transport {
        self.inner.transport.transport_type()
    }

    /// Returns the transport's request counters.
    pub fn stats(&self) -> TransportStats {
        self.inner.transport.stats()
    }

    /// Creates a client from the inner implementation.
    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub(crate) fn transport(&self) -> &dyn EntityTransport {
        self.inner.transport.as_ref()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.inner.url)
            .field("transport", &self.inner.transport.transport_type())
            .finish_non_exhaustive()
    }
}
