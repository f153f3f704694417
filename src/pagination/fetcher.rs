//! Page fetching
//!
//! One paginated GET: `cursor` and `per-page` appended to a
//! builder-produced collection URL.

use super::types::{Cursor, Page};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Fetches single pages from a collection URL
///
/// Status handling at this layer:
/// - 200 → the typed page payload
/// - 404 → a semantically-empty page (the API treats "no more results" and
///   "not found" interchangeably for some paths)
/// - anything else non-2xx → `Error::HttpStatus`, never swallowed
///
/// There is no retry here; retry-on-status policy belongs to the HTTP
/// transport.
pub struct PageFetcher<'a> {
    http: &'a HttpClient,
}

impl<'a> PageFetcher<'a> {
    /// Create a fetcher over an HTTP transport
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Fetch one page at `cursor` with the given page size
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        cursor: &Cursor,
        per_page: u32,
    ) -> Result<Page<T>> {
        let config = RequestConfig::new()
            .query("cursor", cursor.as_str())
            .query("per-page", per_page.to_string());

        match self.http.get_with_config(url, config).await {
            Ok(response) => {
                let mut page: Page<T> = response.json().await.map_err(Error::Http)?;
                page.url = url.to_string();
                Ok(page)
            }
            Err(Error::HttpStatus { status: 404, .. }) => {
                debug!("404 from {url}, treating as empty terminal page");
                Ok(Page::empty(url, per_page))
            }
            Err(e) => Err(e),
        }
    }
}
