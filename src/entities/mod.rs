//! Entity types of the ordering domain.
//!
//! Each entity is served under `api/<resource>` and carries a
//! server-assigned numeric identity:
//!
//! | Entity | Resource path |
//! |--------|---------------|
//! | [`Customer`] | `api/customers` |
//! | [`Restaurant`] | `api/restaurants` |
//! | [`Menu`] | `api/menus` |
//! | [`Dish`] | `api/dishes` |
//! | [`Order`] | `api/orders` |
//! | [`OrderItem`] | `api/order-items` |
//! | [`Payment`] | `api/payments` |
//!
//! All fields are optional on the wire; absent fields are omitted from
//! request bodies rather than sent as `null`.

mod customer;
mod dish;
mod menu;
mod order;
mod order_item;
mod payment;
mod restaurant;

pub use customer::Customer;
pub use dish::Dish;
pub use menu::Menu;
pub use order::{Order, OrderStatus};
pub use order_item::OrderItem;
pub use payment::{Payment, PaymentType};
pub use restaurant::Restaurant;

use serde::{Serialize, de::DeserializeOwned};

/// Server-assigned identity of an entity.
pub type EntityId = i64;

/// A record type served by the REST API.
///
/// Implementations describe where the entity lives and which of its form
/// fields need normalization before submission (see [`crate::form`]).
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Path segment under `api/`, e.g. `"order-items"`.
    const RESOURCE: &'static str;

    /// Singular name used in logs, e.g. `"orderItem"`.
    const NAME: &'static str;

    /// Form fields holding numbers, besides `id`.
    const NUMERIC_FIELDS: &'static [&'static str] = &[];

    /// Fields referencing another entity, submitted as `{ "id": n }`.
    const RELATIONSHIPS: &'static [&'static str] = &[];

    /// Returns the identity, if the entity has been persisted.
    fn id(&self) -> Option<EntityId>;

    /// Sets or clears the identity.
    fn set_id(&mut self, id: Option<EntityId>);

    /// Returns the collection path, `api/<resource>`.
    fn collection_path() -> String {
        format!("api/{}", Self::RESOURCE)
    }

    /// Returns the item path, `api/<resource>/<id>`.
    fn item_path(id: EntityId) -> String {
        format!("api/{}/{}", Self::RESOURCE, id)
    }
}

/// Implements the identity accessors of [`Entity`] for a struct with an
/// `id: Option<EntityId>` field.
macro_rules! entity_id_accessors {
    () => {
        fn id(&self) -> Option<$crate::entities::EntityId> {
            self.id
        }

        fn set_id(&mut self, id: Option<$crate::entities::EntityId>) {
            self.id = id;
        }
    };
}
pub(crate) use entity_id_accessors;
