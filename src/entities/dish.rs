//! Dishes listed on menus.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, Menu, entity_id_accessors};

/// A dish on a menu.
///
/// `price` is a decimal amount; `spicyLevel` is a small integer scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    /// Server-assigned identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Dish name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub name: Option<String>,
    /// Price in the restaurant's currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub description: Option<String>,
    /// Heat level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spicy_level: Option<i32>,
    /// Menu the dish belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<Menu>,
}

impl Entity for Dish {
    const RESOURCE: &'static str = "dishes";
    const NAME: &'static str = "dish";
    const NUMERIC_FIELDS: &'static [&'static str] = &["price", "spicyLevel"];
    const RELATIONSHIPS: &'static [&'static str] = &["menu"];

    entity_id_accessors!();
}
