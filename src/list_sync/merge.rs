//! Combining fetched pages with the list already held.

use std::collections::HashSet;

use super::FetchKind;
use crate::entities::{Entity, EntityId};

/// Merges a fetched page into `existing`.
///
/// - [`FetchKind::Refresh`]: the result is exactly `incoming`.
/// - [`FetchKind::Continuation`]: the result is `existing` followed by
///   `incoming`, skipping incoming items whose id is already held (the
///   server's pages overlapped). Items without an id are always appended.
///
/// Order within each page is preserved.
///
/// ```rust
/// use ifoodapp::Customer;
/// use ifoodapp::list_sync::{FetchKind, merge_into_list};
///
/// let customer = |id| Customer { id: Some(id), ..Default::default() };
/// let merged = merge_into_list(
///     vec![customer(1), customer(2)],
///     vec![customer(2), customer(3)],
///     FetchKind::Continuation { page: 1 },
/// );
/// let ids: Vec<_> = merged.iter().map(|c| c.id.unwrap()).collect();
/// assert_eq!(ids, vec![1, 2, 3]);
/// ```
pub fn merge_into_list<T: Entity>(existing: Vec<T>, incoming: Vec<T>, kind: FetchKind) -> Vec<T> {
    if kind.is_refresh() {
        return incoming;
    }

    let mut merged = existing;
    let mut seen: HashSet<EntityId> = merged.iter().filter_map(Entity::id).collect();

    for item in incoming {
        match item.id() {
            Some(id) if !seen.insert(id) => {
                tracing::debug!(entity = T::NAME, id, "skipping item already in list");
            },
            _ => merged.push(item),
        }
    }
    merged
}
