//! Pages of list results and the pagination headers they come with.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Base used to resolve relative URLs found in a `link` header. Only the
/// query string of the resolved URL is read.
const LINK_BASE: &str = "http://localhost/";

/// Page numbers by link relation (`first`, `prev`, `next`, `last`).
///
/// Parsed from an RFC 5988 `link` response header. A missing relation means
/// there is no page in that direction. The `size` parameter the server put
/// on the link targets is kept as [`page_size`](Self::page_size).
///
/// ```rust
/// use ifoodapp::PageLinks;
///
/// let links = PageLinks::parse(
///     r#"<api/dishes?page=1&size=20>; rel="next", <api/dishes?page=4&size=20>; rel="last""#,
/// )
/// .unwrap();
/// assert_eq!(links.next(), Some(1));
/// assert_eq!(links.last(), Some(4));
/// assert_eq!(links.prev(), None);
/// assert_eq!(links.page_size(), Some(20));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageLinks {
    pages: BTreeMap<String, u32>,
    #[serde(skip)]
    size: Option<u32>,
}

impl PageLinks {
    /// Creates an empty link set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `link` header value.
    ///
    /// Entries look like `<url>; rel="next"`; the page number is the `page`
    /// query parameter of `url`. Entries without a usable URL, relation or
    /// page number are skipped. Returns `None` when the header is non-empty
    /// but no entry could be used.
    pub fn parse(header: &str) -> Option<Self> {
        let mut links = PageLinks::new();
        let mut saw_entry = false;

        for entry in split_entries(header) {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            saw_entry = true;
            if let Some(parsed) = parse_entry(entry) {
                if parsed.rels.iter().any(|rel| rel == "next") || links.size.is_none() {
                    links.size = parsed.size.or(links.size);
                }
                for rel in parsed.rels {
                    links.pages.insert(rel, parsed.page);
                }
            }
        }

        if saw_entry && links.is_empty() {
            None
        } else {
            Some(links)
        }
    }

    /// Returns the page number for a relation.
    pub fn get(&self, rel: &str) -> Option<u32> {
        self.pages.get(rel).copied()
    }

    /// Sets the page number for a relation.
    pub fn insert(&mut self, rel: impl Into<String>, page: u32) {
        self.pages.insert(rel.into(), page);
    }

    /// Returns the `next` page, if there is one.
    pub fn next(&self) -> Option<u32> {
        self.get("next")
    }

    /// Returns the `prev` page, if there is one.
    pub fn prev(&self) -> Option<u32> {
        self.get("prev")
    }

    /// Returns the `first` page, if present.
    pub fn first(&self) -> Option<u32> {
        self.get("first")
    }

    /// Returns the `last` page, if present.
    pub fn last(&self) -> Option<u32> {
        self.get("last")
    }

    /// Returns the page size the server used in its link targets.
    ///
    /// Taken from the `next` link when it carries one.
    pub fn page_size(&self) -> Option<u32> {
        self.size
    }

    /// Returns `true` if there are no relations.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterates relations and their page numbers in relation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.pages.iter().map(|(rel, page)| (rel.as_str(), *page))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for PageLinks {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().map(|(rel, page)| (rel.into(), page)).collect(),
            size: None,
        }
    }
}

/// Splits a `link` header on the commas that separate entries, ignoring
/// commas inside `<...>` (sort parameters put them there).
fn split_entries(header: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in header.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&header[start..i]);
                start = i + 1;
            },
            _ => {},
        }
    }
    entries.push(&header[start..]);
    entries
}

struct LinkEntry {
    page: u32,
    size: Option<u32>,
    rels: Vec<String>,
}

fn parse_entry(entry: &str) -> Option<LinkEntry> {
    let rest = entry.strip_prefix('<')?;
    let (target, params) = rest.split_once('>')?;

    let relations: Vec<String> = params
        .split(';')
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            (key.trim() == "rel").then(|| value.trim().trim_matches('"').to_string())
        })
        .flat_map(|value| {
            value
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();
    if relations.is_empty() {
        return None;
    }

    let base = url::Url::parse(LINK_BASE).ok()?;
    let url = base.join(target.trim()).ok()?;
    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.parse::<u32>().ok())
    };
    let page = param("page")?;

    Some(LinkEntry {
        page,
        size: param("size").filter(|size| *size > 0),
        rels: relations,
    })
}

/// Parses an `x-total-count` header value.
///
/// Returns `None` for anything that is not a non-negative decimal integer.
pub fn parse_total_count(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

/// One fetched page of entities.
///
/// ```rust
/// use ifoodapp::{Page, PageLinks};
///
/// let page = Page::new(vec!["a", "b"], PageLinks::new(), 2);
/// assert_eq!(page.len(), 2);
/// assert!(!page.has_next());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// Pagination relations of this response.
    pub links: PageLinks,
    /// Total items across all pages.
    pub total_count: u64,
}

impl<T> Page<T> {
    /// Creates a page.
    pub fn new(items: Vec<T>, links: PageLinks, total_count: u64) -> Self {
        Self {
            items,
            links,
            total_count,
        }
    }

    /// Returns `true` if this page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the server advertised a `next` page.
    pub fn has_next(&self) -> bool {
        self.links.next().is_some()
    }

    /// Converts the items, keeping the pagination data.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            links: self.links,
            total_count: self.total_count,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            links: PageLinks::default(),
            total_count: 0,
        }
    }
}
