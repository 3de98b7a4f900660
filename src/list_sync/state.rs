//! Per-screen list state and fetch bookkeeping.

use crate::Error;
use crate::types::{ListQuery, PageLinks, PageRequest, SortState};

/// How a fetched page combines with the list already held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// A fresh cycle (mount, sort change, refresh): the page replaces the
    /// list.
    Refresh,
    /// The next page of the current cycle: the page is appended.
    Continuation {
        /// Zero-based page to request, taken from the `next` link.
        page: u32,
    },
}

impl FetchKind {
    /// Returns `true` for [`FetchKind::Refresh`].
    pub fn is_refresh(&self) -> bool {
        matches!(self, FetchKind::Refresh)
    }
}

/// Identifies one issued fetch.
///
/// Sequence numbers grow with every fetch a controller begins; only the
/// ticket of the most recent one can still change state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub(crate) sequence: u64,
    pub(crate) kind: FetchKind,
    pub(crate) sort: SortState,
}

impl FetchTicket {
    /// Returns the sequence number.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the merge mode of this fetch.
    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    /// Returns the sort the fetch was issued with.
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Returns the request parameters for this fetch.
    ///
    /// A refresh carries only the sort; a continuation adds `page` and
    /// `size`.
    pub fn query(&self, page_size: u32) -> ListQuery {
        let query = ListQuery::sorted(self.sort.clone());
        match self.kind {
            FetchKind::Refresh => query,
            FetchKind::Continuation { page } => {
                query.with_page(PageRequest::new(page, page_size))
            },
        }
    }
}

/// What a list screen renders from.
///
/// Only the owning [`ListSyncController`](super::ListSyncController)
/// mutates it.
#[derive(Debug)]
pub struct ListState<T> {
    pub(crate) entities: Vec<T>,
    pub(crate) loading: bool,
    pub(crate) links: PageLinks,
    pub(crate) total_items: u64,
    pub(crate) error: Option<Error>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            loading: false,
            links: PageLinks::new(),
            total_items: 0,
            error: None,
        }
    }
}

impl<T> ListState<T> {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Items accumulated over the fetched pages.
    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    /// `true` while the latest fetch is outstanding.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Pagination relations of the last applied page.
    pub fn links(&self) -> &PageLinks {
        &self.links
    }

    /// Total items across all pages, as last reported by the server.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// The error of the last fetch, if it failed.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Returns `true` if the server advertised another page.
    pub fn has_more(&self) -> bool {
        self.links.next().is_some()
    }

    /// Returns to the freshly created state.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
