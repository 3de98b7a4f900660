//! Menus published by restaurants.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, Restaurant, entity_id_accessors};

/// A menu, owned by a restaurant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    /// Server-assigned identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Menu name, e.g. "Lunch".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub name: Option<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub description: Option<String>,
    /// Owning restaurant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<Restaurant>,
}

impl Menu {
    /// Returns a reference to the menu with the given id.
    pub fn reference(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

impl Entity for Menu {
    const RESOURCE: &'static str = "menus";
    const NAME: &'static str = "menu";
    const RELATIONSHIPS: &'static [&'static str] = &["restaurant"];

    entity_id_accessors!();
}
