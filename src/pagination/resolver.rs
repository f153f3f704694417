//! Cursor resolution
//!
//! The API only chains cursors forward; there is no "jump to page n". To
//! land on a specific page number the intermediate pages have to be
//! replayed, keeping only each response's `next_cursor`.

use super::fetcher::PageFetcher;
use super::types::Cursor;
use crate::error::Result;
use serde_json::Value;
use tracing::debug;

/// Resolve the cursor that yields `target_page`.
///
/// For `target_page <= 1` this returns the start sentinel without touching
/// the network. Otherwise it performs exactly `target_page - 1` sequential
/// fetches, discarding result bodies. That is O(target_page) remote round
/// trips — an inherent cost of the forward-only protocol, kept in a
/// distinct operation so callers can reason about it.
///
/// If the collection ends before `target_page` is reached, the cursor that
/// produced the terminal page is returned; fetching with it lands on a
/// possibly-empty terminal page rather than an error. Any other fetch
/// failure propagates unmodified.
pub async fn resolve_cursor(
    fetcher: &PageFetcher<'_>,
    url: &str,
    target_page: u32,
    per_page: u32,
) -> Result<Cursor> {
    if target_page <= 1 {
        return Ok(Cursor::start());
    }

    let mut cursor = Cursor::start();
    for replayed in 1..target_page {
        let page = fetcher.fetch::<Value>(url, &cursor, per_page).await?;
        match page.next_cursor() {
            Some(next) => cursor = next,
            None => {
                debug!(
                    "collection exhausted after page {replayed}, short of page {target_page}"
                );
                return Ok(cursor);
            }
        }
    }

    Ok(cursor)
}
