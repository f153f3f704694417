//! Cursor pagination
//!
//! The API paginates with forward-only opaque cursors: every response
//! carries a `next_cursor` that yields the following page, and the `"*"`
//! sentinel starts a fresh traversal. There is no random access.
//!
//! # Overview
//!
//! - `types` — `Cursor`, `Page`, `PageMeta`
//! - `fetcher` — one GET with pagination parameters, 404-as-empty-page
//! - `resolver` — translate a page number into a cursor by replaying
//!   intermediate pages (O(n) round trips, documented cost)
//! - `driver` — the three traversal modes: single page, bounded window,
//!   drain-to-completion (monolithic or chunked-to-disk)

mod driver;
mod fetcher;
mod resolver;
mod types;

pub use driver::PaginationDriver;
pub use fetcher::PageFetcher;
pub use resolver::resolve_cursor;
pub use types::{Cursor, Page, PageMeta, MAX_PER_PAGE};
