//! Line items of an order.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, Order, entity_id_accessors};

/// One line of an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Server-assigned identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Units ordered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    /// Line total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    /// Order this line belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

impl Entity for OrderItem {
    const RESOURCE: &'static str = "order-items";
    const NAME: &'static str = "orderItem";
    const NUMERIC_FIELDS: &'static [&'static str] = &["quantity", "totalPrice"];
    const RELATIONSHIPS: &'static [&'static str] = &["order"];

    entity_id_accessors!();
}
