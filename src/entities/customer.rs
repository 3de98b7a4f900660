//! Customers placing orders.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, entity_id_accessors};

/// A customer.
///
/// `name` and `email` are required by the server; `phoneNumber` and
/// `address` may be blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Server-assigned identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub name: Option<String>,
    /// Contact e-mail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub email: Option<String>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub phone_number: Option<String>,
    /// Delivery address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub address: Option<String>,
}

impl Entity for Customer {
    const RESOURCE: &'static str = "customers";
    const NAME: &'static str = "customer";

    entity_id_accessors!();
}
