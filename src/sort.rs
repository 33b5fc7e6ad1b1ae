//! Sort-order policy shared by the listing pages.
//!
//! Every listing maps the same enumerated `sort` query value onto an
//! `ORDER BY` clause. The columns and the fallback order differ per table,
//! so each table gets its own [`SortPolicy`] and the mapping itself lives in
//! [`SortPolicy::order_by`].

use std::fmt;

/// Sort key accepted in the `sort` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Alphabetical by title.
    Title,
    /// Alphabetical by author.
    Author,
    /// Highest rating first.
    Rating,
}

impl SortKey {
    /// All keys, in the order the sort chips are shown.
    pub const ALL: [SortKey; 3] = [SortKey::Title, SortKey::Author, SortKey::Rating];

    /// Parse a query value. Unknown or empty values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(SortKey::Title),
            "author" => Some(SortKey::Author),
            "rating" => Some(SortKey::Rating),
            _ => None,
        }
    }

    /// Query string value for this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Rating => "rating",
        }
    }

    /// Human label used on the sort chips.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::Author => "Author",
            SortKey::Rating => "Rating",
        }
    }
}

/// Query parameters of the listing pages.
///
/// Built from raw key/value pairs so that a repeated `sort` does not reject
/// the request.
#[derive(Debug, Default)]
pub struct SortParams {
    values: Vec<String>,
}

impl SortParams {
    /// Collect the `sort` values from decoded query pairs.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .filter(|(name, _)| name == "sort")
                .map(|(_, value)| value)
                .collect(),
        }
    }

    /// The requested key, only when exactly one known value was given.
    pub fn key(&self) -> Option<SortKey> {
        match self.values.as_slice() {
            [value] => SortKey::parse(value),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// A single column ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    /// Column expression, always a compile-time constant.
    pub column: &'static str,
    /// Direction.
    pub direction: Direction,
}

impl OrderBy {
    const fn asc(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Asc,
        }
    }

    const fn desc(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Desc,
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Asc => write!(f, "ORDER BY {}", self.column),
            Direction::Desc => write!(f, "ORDER BY {} DESC", self.column),
        }
    }
}

/// Per-table sort configuration.
#[derive(Debug, Clone, Copy)]
pub struct SortPolicy {
    title: &'static str,
    author: &'static str,
    rating: &'static str,
    default: Option<OrderBy>,
}

/// Covers keep their natural order unless a key is given.
pub const COVER_SORT: SortPolicy = SortPolicy {
    title: "c.title",
    author: "c.author",
    rating: "c.rating",
    default: None,
};

/// Books default to newest first.
pub const BOOK_SORT: SortPolicy = SortPolicy {
    title: "title",
    author: "author",
    rating: "rating",
    default: Some(OrderBy::desc("id")),
};

impl SortPolicy {
    /// Resolve a key to an ordering. Text columns sort ascending, rating
    /// sorts descending; no key means the table default.
    pub fn order_by(&self, key: Option<SortKey>) -> Option<OrderBy> {
        match key {
            Some(SortKey::Title) => Some(OrderBy::asc(self.title)),
            Some(SortKey::Author) => Some(OrderBy::asc(self.author)),
            Some(SortKey::Rating) => Some(OrderBy::desc(self.rating)),
            None => self.default,
        }
    }

    /// SQL fragment to append to a SELECT, empty when there is no ordering.
    pub fn clause(&self, key: Option<SortKey>) -> String {
        self.order_by(key)
            .map(|o| o.to_string())
            .unwrap_or_default()
    }
}
