//! Keeping the location query in step with the sort state.

use crate::types::SortState;

/// Result of comparing the location query with the sort state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSync {
    /// The location should move to this query (`?sort=<field>,<DIR>`).
    Navigate(String),
    /// The location already shows the sort state.
    NoOp,
}

impl UrlSync {
    /// Returns the navigation target, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            UrlSync::Navigate(query) => Some(query),
            UrlSync::NoOp => None,
        }
    }
}

/// Decides whether the location must change to reflect `sort`.
///
/// The comparison is verbatim: a query that means the same sort but is
/// spelled differently (extra parameters, `order=`, percent-encoding) still
/// yields a navigation to the canonical spelling.
///
/// ```rust
/// use ifoodapp::{SortDirection, SortState};
/// use ifoodapp::list_sync::{UrlSync, sync_url};
///
/// let sort = SortState::new("name", SortDirection::Asc);
/// assert_eq!(sync_url("?sort=name,ASC", &sort), UrlSync::NoOp);
/// assert_eq!(
///     sync_url("", &sort),
///     UrlSync::Navigate("?sort=name,ASC".to_string())
/// );
/// ```
pub fn sync_url(current_query: &str, sort: &SortState) -> UrlSync {
    let canonical = sort.canonical_query();
    if canonical == current_query {
        UrlSync::NoOp
    } else {
        UrlSync::Navigate(canonical)
    }
}
