//! Prelude module for convenient imports.
//!
//! ```rust
//! use ifoodapp::prelude::*;
//! ```
//!
//! This provides access to:
//! - Client types
//! - Error types
//! - Entity types
//! - List screen types

pub use crate::{
    client::{Client, ClientBuilder, EntityClient},
    config::{ListConfig, TlsConfig},
    editor::EntityEditor,
    entities::{
        Customer, Dish, Entity, EntityId, Menu, Order, OrderItem, OrderStatus, Payment,
        PaymentType, Restaurant,
    },
    error::{Error, ErrorKind, Result},
    form::FormValues,
    list_sync::{FetchKind, FetchOutcome, ListState, ListSyncController},
    types::{ListQuery, Page, PageLinks, PageRequest, SortDirection, SortState},
};
