//! Query parameters of a list request.

use super::SortState;

/// An explicit page request (`page=<n>&size=<n>`). Pages are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number.
    pub page: u32,
    /// Items per page.
    pub size: u32,
}

impl PageRequest {
    /// Creates a page request.
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }
}

/// Parameters of `GET api/<entities>`.
///
/// Without a page the request has full-refresh semantics and carries only
/// the sort parameter.
///
/// ```rust
/// use ifoodapp::{ListQuery, PageRequest, SortDirection, SortState};
///
/// let sort = SortState::new("name", SortDirection::Asc);
/// assert_eq!(ListQuery::sorted(sort.clone()).to_query_string(), "sort=name,ASC");
///
/// let query = ListQuery::sorted(sort).with_page(PageRequest::new(1, 20));
/// assert_eq!(query.to_query_string(), "page=1&size=20&sort=name,ASC");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Sort to apply, if any.
    pub sort: Option<SortState>,
    /// Explicit page, if any.
    pub page: Option<PageRequest>,
}

impl ListQuery {
    /// Creates an empty query (server defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a full-refresh query for the given sort.
    pub fn sorted(sort: SortState) -> Self {
        Self {
            sort: Some(sort),
            page: None,
        }
    }

    /// Sets the explicit page.
    #[must_use]
    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = Some(page);
        self
    }

    /// Renders the query string, without the leading `?`.
    ///
    /// The comma between field and direction is kept literal; the field name
    /// itself is percent-encoded.
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();

        if let Some(page) = &self.page {
            parts.push(format!("page={}", page.page));
            parts.push(format!("size={}", page.size));
        }
        if let Some(sort) = &self.sort {
            parts.push(format!(
                "sort={},{}",
                urlencoding::encode(&sort.field),
                sort.direction
            ));
        }

        parts.join("&")
    }
}
