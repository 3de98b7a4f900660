//! List screen configuration.

use crate::types::SortDirection;

/// Default field a list is sorted by when the URL carries no sort state.
pub const DEFAULT_SORT_FIELD: &str = "id";

/// Default number of items requested per continuation page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Configuration for a [`ListSyncController`](crate::list_sync::ListSyncController).
///
/// ## Default Values
///
/// - `default_sort_field`: `"id"`
/// - `default_direction`: ascending
/// - `page_size`: 20
///
/// ## Example
///
/// ```rust
/// use ifoodapp::ListConfig;
///
/// let config = ListConfig::new()
///     .with_default_sort_field("name")
///     .with_page_size(50);
/// assert_eq!(config.page_size, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct ListConfig {
    /// Field used when the location query carries no usable sort state.
    #[builder(into, default = DEFAULT_SORT_FIELD.to_string())]
    pub default_sort_field: String,

    /// Direction used together with `default_sort_field`.
    #[builder(default)]
    pub default_direction: SortDirection,

    /// Items requested per continuation page (`size=` query parameter) when
    /// the server's `next` link does not name a size.
    #[builder(default = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_sort_field: DEFAULT_SORT_FIELD.to_string(),
            default_direction: SortDirection::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListConfig {
    /// Creates a new list configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field sorted by when the URL carries no sort state.
    #[must_use]
    pub fn with_default_sort_field(mut self, field: impl Into<String>) -> Self {
        self.default_sort_field = field.into();
        self
    }

    /// Sets the direction paired with the default sort field.
    #[must_use]
    pub fn with_default_direction(mut self, direction: SortDirection) -> Self {
        self.default_direction = direction;
        self
    }

    /// Sets the continuation page size. Zero is raised to one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = ListConfig::default();
        assert_eq!(config.default_sort_field, "id");
        assert_eq!(config.default_direction, SortDirection::Asc);
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_with_setters() {
        let config = ListConfig::new()
            .with_default_sort_field("orderDate")
            .with_default_direction(SortDirection::Desc)
            .with_page_size(5);

        assert_eq!(config.default_sort_field, "orderDate");
        assert_eq!(config.default_direction, SortDirection::Desc);
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_page_size_floor() {
        assert_eq!(ListConfig::new().with_page_size(0).page_size, 1);
    }

    #[test]
    fn test_builder_matches_default() {
        assert_eq!(ListConfig::builder().build(), ListConfig::default());

        let config = ListConfig::builder().default_sort_field("name").build();
        assert_eq!(config.default_sort_field, "name");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
