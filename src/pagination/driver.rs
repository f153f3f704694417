//! Traversal driver
//!
//! Repeated page fetches under the three traversal modes: single page,
//! bounded multi-page window, and drain-to-completion (monolithic or
//! chunked to an export sink). Pages are fetched strictly sequentially —
//! each page's cursor comes from the previous response, so there is never
//! more than one request in flight.

use super::fetcher::PageFetcher;
use super::resolver::resolve_cursor;
use super::types::{Cursor, Page, PageMeta, MAX_PER_PAGE};
use crate::error::{Error, Result};
use crate::export::{self, DrainReport, ExportTarget};
use crate::http::HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Drives multi-page traversals over one collection URL
///
/// Owns nothing across calls: every traversal gets its own cursor chain and
/// accumulator, so concurrent traversals on one client share only the
/// immutable transport configuration.
pub struct PaginationDriver<'a> {
    fetcher: PageFetcher<'a>,
}

impl<'a> PaginationDriver<'a> {
    /// Create a driver over an HTTP transport
    pub fn new(http: &'a HttpClient) -> Self {
        Self {
            fetcher: PageFetcher::new(http),
        }
    }

    /// The underlying page fetcher
    pub fn fetcher(&self) -> &PageFetcher<'a> {
        &self.fetcher
    }

    /// Fetch a single page at `cursor`, returned verbatim
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        url: &str,
        cursor: &Cursor,
        per_page: u32,
    ) -> Result<Page<T>> {
        self.fetcher.fetch(url, cursor, per_page).await
    }

    /// Fetch pages `start_page..=end_page` and concatenate their results.
    ///
    /// The cursor for `start_page` is resolved by replay, then each page's
    /// `next_cursor` advances the walk until `end_page` is reached or the
    /// collection runs out — whichever comes first. A collection shorter
    /// than the requested window is not an error; whatever was collected
    /// comes back. `meta.count` and `meta.per_page` are taken from the
    /// first page fetched and `meta.page` reports `start_page`.
    pub async fn fetch_window<T: DeserializeOwned>(
        &self,
        url: &str,
        start_page: u32,
        end_page: u32,
        per_page: u32,
    ) -> Result<Page<T>> {
        let cursor = resolve_cursor(&self.fetcher, url, start_page, per_page).await?;

        let first = self.fetcher.fetch::<T>(url, &cursor, per_page).await?;
        let mut meta = PageMeta {
            count: first.meta.count,
            page: Some(start_page),
            per_page: first.meta.per_page,
            next_cursor: first.meta.next_cursor,
        };
        let mut results = first.results;

        let mut current_page = start_page;
        while current_page < end_page {
            let Some(cursor) = meta.next_cursor.as_deref().map(Cursor::new) else {
                break;
            };
            let page = self.fetcher.fetch::<T>(url, &cursor, per_page).await?;
            results.extend(page.results);
            meta.next_cursor = page.meta.next_cursor;
            current_page += 1;
        }

        debug!(
            "window {start_page}..={end_page}: collected {} results",
            results.len()
        );
        Ok(Page {
            results,
            meta,
            url: url.to_string(),
        })
    }

    /// Drain the whole collection into one in-memory window.
    ///
    /// Starts at the sentinel with the page size forced to `MAX_PER_PAGE`
    /// and advances until `next_cursor` is absent. Every result is held in
    /// memory; for large collections prefer `drain_chunked`.
    pub async fn drain<T: DeserializeOwned>(&self, url: &str) -> Result<Page<T>> {
        let mut cursor = Cursor::start();
        let mut pages_fetched = 0u32;

        let first = self.fetcher.fetch::<T>(url, &cursor, MAX_PER_PAGE).await?;
        let meta = PageMeta {
            count: first.meta.count,
            page: Some(1),
            per_page: first.meta.per_page,
            next_cursor: None,
        };
        let mut results = first.results;
        let mut next = first.meta.next_cursor;
        pages_fetched += 1;

        while let Some(token) = next {
            cursor = Cursor::new(token);
            let page = self.fetcher.fetch::<T>(url, &cursor, MAX_PER_PAGE).await?;
            results.extend(page.results);
            next = page.meta.next_cursor;
            pages_fetched += 1;
        }

        debug!("drained {} results over {pages_fetched} pages", results.len());
        Ok(Page {
            results,
            meta,
            url: url.to_string(),
        })
    }

    /// Drain the whole collection, flushing fixed-size chunks to disk.
    ///
    /// Accumulates results until `chunk_size` is reached, writes that chunk
    /// to the export sink (filename stem suffixed with the chunk index),
    /// clears the accumulator, and continues; the final partial chunk is
    /// flushed when draining ends. Nothing is returned to the caller beyond
    /// the report — "export as you go" trades result availability for
    /// bounded memory.
    ///
    /// A failed fetch aborts the traversal; chunks already flushed remain
    /// on disk.
    pub async fn drain_chunked(
        &self,
        url: &str,
        chunk_size: usize,
        target: &ExportTarget,
    ) -> Result<DrainReport> {
        if chunk_size == 0 {
            return Err(Error::validation("chunk_size must be at least 1"));
        }

        let mut buffer: Vec<Value> = Vec::new();
        let mut cursor = Cursor::start();
        let mut report = DrainReport::default();

        loop {
            let page = self
                .fetcher
                .fetch::<Value>(url, &cursor, MAX_PER_PAGE)
                .await?;
            buffer.extend(page.results);

            while buffer.len() >= chunk_size {
                let chunk: Vec<Value> = buffer.drain(..chunk_size).collect();
                let path = export::write_chunk(target, report.chunks_written + 1, &chunk)?;
                debug!("flushed chunk {} ({} records)", report.chunks_written + 1, chunk.len());
                report.add_chunk(path, chunk.len());
            }

            match page.meta.next_cursor {
                Some(token) => cursor = Cursor::new(token),
                None => break,
            }
        }

        if !buffer.is_empty() {
            let path = export::write_chunk(target, report.chunks_written + 1, &buffer)?;
            debug!(
                "flushed final chunk {} ({} records)",
                report.chunks_written + 1,
                buffer.len()
            );
            report.add_chunk(path, buffer.len());
        }

        Ok(report)
    }
}
