//! Restaurants offering menus.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, entity_id_accessors};

/// A restaurant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Server-assigned identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Restaurant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub name: Option<String>,
    /// Free-form location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub location: Option<String>,
    /// Average customer rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Restaurant {
    /// Returns a reference to the restaurant with the given id, as used in
    /// relationship fields.
    pub fn reference(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

impl Entity for Restaurant {
    const RESOURCE: &'static str = "restaurants";
    const NAME: &'static str = "restaurant";
    const NUMERIC_FIELDS: &'static [&'static str] = &["rating"];

    entity_id_accessors!();
}
