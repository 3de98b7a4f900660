//! Paginated list screens kept in step with their URL.
//!
//! A list screen shows a sorted, paginated collection. Its sort lives in the
//! location query (`?sort=<field>,<ASC|DESC>`) so that reloading or sharing
//! the URL restores it. [`ListSyncController`] owns one screen's sort and
//! [`ListState`] and keeps three things consistent:
//!
//! - the sort state, read from the location on mount and toggled by
//!   column-header clicks
//! - the fetched data: a sort change or refresh replaces the list, scrolling
//!   to the end appends the next page
//! - the location: after a successful fetch the query is rewritten to the
//!   canonical spelling of the sort that was fetched
//!
//! Fetches can overlap. Every fetch gets a [`FetchTicket`]; only the most
//! recently issued ticket can change state, so a slow response for an old
//! sort never overwrites a newer one.
//!
//! The pure pieces are usable on their own: [`initialize`], [`set_sort`],
//! [`merge_into_list`] and [`sync_url`].

mod controller;
mod merge;
mod state;
mod url;

pub use controller::{FetchOutcome, ListSyncController, PendingFetch};
pub use merge::merge_into_list;
pub use state::{FetchKind, FetchTicket, ListState};
pub use url::{UrlSync, sync_url};

use crate::config::ListConfig;
use crate::types::SortState;

/// Reads the sort state a list screen starts with from its location query.
///
/// Falls back to the configured default field and direction when the query
/// carries no usable sort.
///
/// ```rust
/// use ifoodapp::{ListConfig, SortDirection, SortState};
/// use ifoodapp::list_sync::initialize;
///
/// let config = ListConfig::new();
/// assert_eq!(initialize("", &config), SortState::new("id", SortDirection::Asc));
/// assert_eq!(
///     initialize("?sort=name,DESC", &config),
///     SortState::new("name", SortDirection::Desc)
/// );
/// ```
pub fn initialize(location_query: &str, config: &ListConfig) -> SortState {
    let default = SortState::new(config.default_sort_field.clone(), config.default_direction);
    SortState::from_query(location_query, &default)
}

/// Returns the sort state after the user picks `field`.
///
/// Same field: direction flips. Different field: that field, ascending.
pub fn set_sort(current: &SortState, field: &str) -> SortState {
    current.toggled_by(field)
}
