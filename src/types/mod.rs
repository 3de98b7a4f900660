//! Core value types shared by the client and list screens.
//!
//! - [`SortState`] / [`SortDirection`]: the sort persisted in a list's URL
//! - [`Page`] / [`PageLinks`]: one fetched page and its pagination relations
//! - [`ListQuery`] / [`PageRequest`]: parameters of a list request

mod page;
mod query;
mod sort;

pub use page::{Page, PageLinks, parse_total_count};
pub use query::{ListQuery, PageRequest};
pub use sort::{SortDirection, SortState};
