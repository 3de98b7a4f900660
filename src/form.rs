//! Turning edit-form input into request bodies.
//!
//! Form inputs hand over every value as text. Before an entity is submitted:
//!
//! - `id` and the entity's [numeric fields](Entity::NUMERIC_FIELDS) are
//!   coerced to JSON numbers; text that is not a number is an
//!   [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error
//! - empty inputs are omitted rather than sent as `""`
//! - [relationship fields](Entity::RELATIONSHIPS) hold the selected id and
//!   are sent as `{ "id": <n> }`
//!
//! [`clean_entity`] then strips what the server must not see: `null`s,
//! empty strings and relationships without an id.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use crate::entities::Entity;
use crate::{Error, Result};

/// Raw form input, by JSON field name.
///
/// ```rust
/// use ifoodapp::form::FormValues;
///
/// let values = FormValues::new()
///     .with("name", "Mapo tofu")
///     .with("price", "11.50")
///     .with("menu", "2");
/// assert_eq!(values.get("price"), Some("11.50"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the form.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets a field.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Returns a field's raw value.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Normalizes form input for entity `T` into a JSON object.
///
/// ```rust
/// use ifoodapp::Dish;
/// use ifoodapp::form::{FormValues, normalize_form};
///
/// let values = FormValues::new()
///     .with("name", "Mapo tofu")
///     .with("price", "11.50")
///     .with("description", "")
///     .with("menu", "2");
/// let body = normalize_form::<Dish>(&values).unwrap();
/// assert_eq!(
///     serde_json::Value::Object(body),
///     serde_json::json!({ "name": "Mapo tofu", "price": 11.5, "menu": { "id": 2 } })
/// );
/// ```
pub fn normalize_form<T: Entity>(values: &FormValues) -> Result<Map<String, Value>> {
    let mut body = Map::new();

    for (field, raw) in values.iter() {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let value = if T::RELATIONSHIPS.contains(&field) {
            let id = parse_id(T::NAME, field, raw)?;
            let mut reference = Map::new();
            reference.insert("id".to_string(), Value::from(id));
            Value::Object(reference)
        } else if field == "id" {
            Value::from(parse_id(T::NAME, field, raw)?)
        } else if T::NUMERIC_FIELDS.contains(&field) {
            Value::Number(parse_number(T::NAME, field, raw)?)
        } else {
            Value::String(raw.to_string())
        };
        body.insert(field.to_string(), value);
    }

    Ok(body)
}

/// Builds the entity to submit from form input.
///
/// Input fields are laid over `base` (the entity being edited, if any), so
/// fields the form does not show keep their current value. A field the form
/// submits empty clears the base value.
pub fn entity_from_form<T: Entity>(values: &FormValues, base: Option<&T>) -> Result<T> {
    let mut merged = match base.map(serde_json::to_value).transpose()? {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    for (field, raw) in values.iter() {
        if raw.trim().is_empty() {
            merged.remove(field);
        }
    }
    merged.extend(normalize_form::<T>(values)?);

    serde_json::from_value(clean_entity(Value::Object(merged))).map_err(|e| {
        Error::invalid_argument(format!("{} form does not describe a valid entity: {}", T::NAME, e))
    })
}

/// Strips fields the server must not receive.
///
/// Removes top-level `null`s and empty strings, and nested objects whose
/// `id` is missing, `null`, empty or `-1` (an unselected relationship).
/// Anything other than an object is returned unchanged.
///
/// ```rust
/// use ifoodapp::form::clean_entity;
/// use serde_json::json;
///
/// let body = clean_entity(json!({
///     "name": "Dinner",
///     "description": "",
///     "restaurant": { "id": "" },
/// }));
/// assert_eq!(body, json!({ "name": "Dinner" }));
/// ```
pub fn clean_entity(entity: Value) -> Value {
    let Value::Object(map) = entity else {
        return entity;
    };

    let cleaned = map
        .into_iter()
        .filter(|(_, value)| match value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            Value::Object(nested) => has_id(nested),
            _ => true,
        })
        .collect();
    Value::Object(cleaned)
}

fn has_id(object: &Map<String, Value>) -> bool {
    match object.get("id") {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_i64() != Some(-1),
        Some(_) => true,
    }
}

fn parse_id(entity: &str, field: &str, raw: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|_| {
        Error::invalid_argument(format!(
            "{}.{}: '{}' is not a valid id",
            entity, field, raw
        ))
    })
}

fn parse_number(entity: &str, field: &str, raw: &str) -> Result<Number> {
    if let Ok(int) = raw.parse::<i64>() {
        return Ok(Number::from(int));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| {
            Error::invalid_argument(format!(
                "{}.{}: '{}' is not a number",
                entity, field, raw
            ))
        })
}
