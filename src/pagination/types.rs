//! Pagination types
//!
//! Cursor and page payload types shared by the fetcher, resolver, and
//! driver.

use serde::Deserialize;
use std::fmt;

/// Largest page size the API supports; drains always use it
pub const MAX_PER_PAGE: u32 = 200;

/// Opaque forward-pagination token
///
/// A cursor only has meaning for the URL and page size that produced it;
/// it must not be reused across differing page sizes and is never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    /// The sentinel meaning "start of collection"
    pub const SENTINEL: &'static str = "*";

    /// Cursor for the start of a collection
    pub fn start() -> Self {
        Self(Self::SENTINEL.to_string())
    }

    /// Wrap a cursor token issued by the API
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the start-of-collection sentinel
    pub fn is_start(&self) -> bool {
        self.0 == Self::SENTINEL
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pagination metadata attached to every page response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    /// Total result count for the whole query
    #[serde(default)]
    pub count: u64,
    /// Page number, when the API reports one
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size this response was produced with
    #[serde(default)]
    pub per_page: u32,
    /// Cursor for the next page; absent on the terminal page
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// One page of results, or a concatenated window of several
///
/// Results keep exactly the order the API returned them; nothing in this
/// crate reorders, deduplicates, or re-sorts them.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Result payload, in API order
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// Pagination metadata
    #[serde(default)]
    pub meta: PageMeta,
    /// The collection URL this page was fetched from (without pagination
    /// parameters)
    #[serde(skip)]
    pub url: String,
}

impl<T> Page<T> {
    /// The semantically-empty page used for 404 responses: zero results,
    /// no next cursor
    pub fn empty(url: impl Into<String>, per_page: u32) -> Self {
        Self {
            results: Vec::new(),
            meta: PageMeta {
                count: 0,
                page: None,
                per_page,
                next_cursor: None,
            },
            url: url.into(),
        }
    }

    /// Number of results on this page
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the page holds no results
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether this is the terminal page of its traversal
    pub fn is_terminal(&self) -> bool {
        self.meta.next_cursor.is_none()
    }

    /// The cursor for the page after this one, if any
    pub fn next_cursor(&self) -> Option<Cursor> {
        self.meta.next_cursor.as_deref().map(Cursor::new)
    }
}
