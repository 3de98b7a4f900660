//! Sort state shared by list screens and the URL they live at.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Direction of a list sort.
///
/// Rendered as `ASC` / `DESC` in query strings, and parsed back only from
/// those exact spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending order (A-Z, oldest first).
    #[default]
    Asc,
    /// Descending order (Z-A, newest first).
    Desc,
}

impl SortDirection {
    /// Returns the query-string spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            other => Err(Error::invalid_argument(format!(
                "invalid sort direction '{}', expected ASC or DESC",
                other
            ))),
        }
    }
}

/// The column a list is sorted by, and in which direction.
///
/// Field and direction always travel together. Use [`toggled_by`] to react to
/// a column-header click:
///
/// ```rust
/// use ifoodapp::{SortDirection, SortState};
///
/// let sort = SortState::default();
/// let sort = sort.toggled_by("name");
/// assert_eq!(sort, SortState::new("name", SortDirection::Asc));
///
/// let sort = sort.toggled_by("name");
/// assert_eq!(sort.direction, SortDirection::Desc);
/// ```
///
/// [`toggled_by`]: SortState::toggled_by
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    /// The field (JSON property name) to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SORT_FIELD, SortDirection::Asc)
    }
}

impl SortState {
    /// Creates a sort state.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Reads the sort state persisted in a location query string.
    ///
    /// Accepts `sort=<field>,<ASC|DESC>`, or `sort=<field>` together with
    /// `order=<ASC|DESC>`. A leading `?` is optional. Anything missing or
    /// malformed yields `default`; this never fails.
    ///
    /// ```rust
    /// use ifoodapp::{SortDirection, SortState};
    ///
    /// let fallback = SortState::default();
    /// let sort = SortState::from_query("?sort=price,DESC", &fallback);
    /// assert_eq!(sort, SortState::new("price", SortDirection::Desc));
    ///
    /// assert_eq!(SortState::from_query("?sort=price,down", &fallback), fallback);
    /// ```
    pub fn from_query(query: &str, default: &SortState) -> SortState {
        Self::parse_query(query).unwrap_or_else(|| default.clone())
    }

    fn parse_query(query: &str) -> Option<SortState> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut sort = None;
        let mut order = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "sort" if sort.is_none() => sort = Some(value.into_owned()),
                "order" if order.is_none() => order = Some(value.into_owned()),
                _ => {},
            }
        }

        let sort = sort?;
        let (field, direction) = match sort.rsplit_once(',') {
            Some((field, direction)) => (field.to_string(), direction.to_string()),
            None => (sort, order?),
        };

        if field.is_empty() {
            return None;
        }
        let direction = direction.parse().ok()?;
        Some(SortState { field, direction })
    }

    /// Returns the next sort state after the user picks `field`.
    ///
    /// Picking the current field flips the direction; picking any other field
    /// starts it ascending.
    #[must_use]
    pub fn toggled_by(&self, field: &str) -> SortState {
        if self.field == field {
            SortState {
                field: self.field.clone(),
                direction: self.direction.toggled(),
            }
        } else {
            SortState::new(field, SortDirection::Asc)
        }
    }

    /// Returns the `sort` parameter value, `<field>,<DIRECTION>`.
    pub fn to_param(&self) -> String {
        format!("{},{}", self.field, self.direction)
    }

    /// Returns the canonical location query for this state,
    /// `?sort=<field>,<DIRECTION>`.
    pub fn canonical_query(&self) -> String {
        format!("?sort={}", self.to_param())
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field, self.direction)
    }
}
