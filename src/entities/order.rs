//! Orders placed by customers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Customer, Entity, EntityId, entity_id_accessors};

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, not yet handled.
    #[default]
    Pending,
    /// Delivered or picked up.
    Completed,
    /// Cancelled before completion.
    Cancelled,
    /// Out for delivery.
    Shipped,
}

impl OrderStatus {
    /// Returns `true` if no further transition is expected.
    pub fn is_final(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Returns the wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Shipped => "SHIPPED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server-assigned identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// When the order was placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<DateTime<Utc>>,
    /// Current status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    /// Ordering customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
}

impl Order {
    /// Returns a reference to the order with the given id.
    pub fn reference(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

impl Entity for Order {
    const RESOURCE: &'static str = "orders";
    const NAME: &'static str = "order";
    const RELATIONSHIPS: &'static [&'static str] = &["customer"];

    entity_id_accessors!();
}
