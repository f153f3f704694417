//! The OpenAlex facade
//!
//! One constructor plus one method family per entity kind. Every method
//! follows the same mechanical pipeline: validate the request, build the
//! collection URL, resolve the cursor, hand the traversal to the driver,
//! and optionally export the final result. No entity-specific logic lives
//! here beyond the path segment — except the works-only abstract
//! reconstruction.

use crate::entities::{
    attach_abstracts, ApiEntity, Author, Autocomplete, Institution, Ngram, NgramBatch, Source,
    Topic, Work,
};
use crate::error::{Error, Result};
use crate::export::{self, DrainReport, ExportTarget};
use crate::http::{BackoffType, HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::pagination::{resolve_cursor, Page, PaginationDriver};
use crate::query::{self, SearchRequest};
use crate::types::{EntityKind, ExternalId, Lookup};
use std::time::Duration;
use tracing::warn;

/// Production API host
pub const BASE_URL: &str = "https://api.openalex.org";

/// Client for the OpenAlex API
///
/// Holds only immutable configuration; each call owns its own cursor chain
/// and accumulator, so a shared client needs no locking.
pub struct OpenAlex {
    http: HttpClient,
    base_url: String,
}

impl OpenAlex {
    /// Client with default configuration (anonymous pool, default retries)
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a client
    pub fn builder() -> OpenAlexBuilder {
        OpenAlexBuilder::default()
    }

    /// The configured API host
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Works
    // ========================================================================

    /// Fetch one work by its OpenAlex id
    pub async fn work(&self, id: &str) -> Result<Lookup<Work>> {
        self.get_entity(id).await
    }

    /// Fetch one work by an external identifier, e.g. a DOI
    pub async fn work_by(&self, namespace: ExternalId, id: &str) -> Result<Lookup<Work>> {
        self.get_entity(&format!("{namespace}:{id}")).await
    }

    /// Search works: single page, bounded window, or full drain depending
    /// on the request. Abstracts are reconstructed from their inverted
    /// index before the page is returned or exported.
    pub async fn works(&self, req: &SearchRequest) -> Result<Page<Work>> {
        let mut page = self.search_entities::<Work>(req).await?;
        attach_abstracts(&mut page.results);
        self.export_results(req, &page.results)?;
        Ok(page)
    }

    /// Drain every work matching the request to disk in fixed-size chunks.
    ///
    /// Never returns results in memory — chunks land in files named after
    /// `target` with the chunk index appended. Records are exported as the
    /// API sent them. An aborted drain leaves already-flushed chunks on
    /// disk.
    pub async fn drain_works_chunked(
        &self,
        req: &SearchRequest,
        chunk_size: usize,
        target: &ExportTarget,
    ) -> Result<DrainReport> {
        self.drain_chunked(EntityKind::Works, req, chunk_size, target)
            .await
    }

    /// Autocomplete works for a partial query
    pub async fn autocomplete_works(&self, q: &str) -> Result<Vec<Autocomplete>> {
        let mut url = url::Url::parse(&format!("{}/autocomplete/works", self.base_url))?;
        url.query_pairs_mut().append_pair("q", q);
        let page: Page<Autocomplete> = self.http.get_json(url.as_str()).await?;
        Ok(page.results)
    }

    /// Fulltext n-grams for one work
    pub async fn work_ngrams(&self, id: &str) -> Result<Vec<Ngram>> {
        let path = format!("works/{id}/ngram");
        let batch: NgramBatch = self.http.get_json(&path).await?;
        Ok(batch.ngrams)
    }

    // ========================================================================
    // Authors
    // ========================================================================

    /// Fetch one author by its OpenAlex id
    pub async fn author(&self, id: &str) -> Result<Lookup<Author>> {
        self.get_entity(id).await
    }

    /// Fetch one author by an external identifier, e.g. an ORCID
    pub async fn author_by(&self, namespace: ExternalId, id: &str) -> Result<Lookup<Author>> {
        self.get_entity(&format!("{namespace}:{id}")).await
    }

    /// Search authors
    pub async fn authors(&self, req: &SearchRequest) -> Result<Page<Author>> {
        let page = self.search_entities::<Author>(req).await?;
        self.export_results(req, &page.results)?;
        Ok(page)
    }

    /// Drain every author matching the request to disk in chunks
    pub async fn drain_authors_chunked(
        &self,
        req: &SearchRequest,
        chunk_size: usize,
        target: &ExportTarget,
    ) -> Result<DrainReport> {
        self.drain_chunked(EntityKind::Authors, req, chunk_size, target)
            .await
    }

    // ========================================================================
    // Sources
    // ========================================================================

    /// Fetch one source by its OpenAlex id
    pub async fn source(&self, id: &str) -> Result<Lookup<Source>> {
        self.get_entity(id).await
    }

    /// Fetch one source by an external identifier, e.g. an ISSN
    pub async fn source_by(&self, namespace: ExternalId, id: &str) -> Result<Lookup<Source>> {
        self.get_entity(&format!("{namespace}:{id}")).await
    }

    /// Search sources
    pub async fn sources(&self, req: &SearchRequest) -> Result<Page<Source>> {
        let page = self.search_entities::<Source>(req).await?;
        self.export_results(req, &page.results)?;
        Ok(page)
    }

    /// Drain every source matching the request to disk in chunks
    pub async fn drain_sources_chunked(
        &self,
        req: &SearchRequest,
        chunk_size: usize,
        target: &ExportTarget,
    ) -> Result<DrainReport> {
        self.drain_chunked(EntityKind::Sources, req, chunk_size, target)
            .await
    }

    // ========================================================================
    // Institutions
    // ========================================================================

    /// Fetch one institution by its OpenAlex id
    pub async fn institution(&self, id: &str) -> Result<Lookup<Institution>> {
        self.get_entity(id).await
    }

    /// Fetch one institution by an external identifier, e.g. a ROR id
    pub async fn institution_by(
        &self,
        namespace: ExternalId,
        id: &str,
    ) -> Result<Lookup<Institution>> {
        self.get_entity(&format!("{namespace}:{id}")).await
    }

    /// Search institutions
    pub async fn institutions(&self, req: &SearchRequest) -> Result<Page<Institution>> {
        let page = self.search_entities::<Institution>(req).await?;
        self.export_results(req, &page.results)?;
        Ok(page)
    }

    /// Drain every institution matching the request to disk in chunks
    pub async fn drain_institutions_chunked(
        &self,
        req: &SearchRequest,
        chunk_size: usize,
        target: &ExportTarget,
    ) -> Result<DrainReport> {
        self.drain_chunked(EntityKind::Institutions, req, chunk_size, target)
            .await
    }

    // ========================================================================
    // Topics
    // ========================================================================

    /// Fetch one topic by its OpenAlex id
    pub async fn topic(&self, id: &str) -> Result<Lookup<Topic>> {
        self.get_entity(id).await
    }

    /// Fetch one topic by an external identifier, e.g. a Wikidata id
    pub async fn topic_by(&self, namespace: ExternalId, id: &str) -> Result<Lookup<Topic>> {
        self.get_entity(&format!("{namespace}:{id}")).await
    }

    /// Search topics
    pub async fn topics(&self, req: &SearchRequest) -> Result<Page<Topic>> {
        let page = self.search_entities::<Topic>(req).await?;
        self.export_results(req, &page.results)?;
        Ok(page)
    }

    /// Drain every topic matching the request to disk in chunks
    pub async fn drain_topics_chunked(
        &self,
        req: &SearchRequest,
        chunk_size: usize,
        target: &ExportTarget,
    ) -> Result<DrainReport> {
        self.drain_chunked(EntityKind::Topics, req, chunk_size, target)
            .await
    }

    // ========================================================================
    // Shared pipeline
    // ========================================================================

    /// Single-entity GET; 404 becomes a placeholder, everything else
    /// propagates
    async fn get_entity<T: ApiEntity>(&self, id: &str) -> Result<Lookup<T>> {
        let path = format!("{}/{id}", T::KIND.path());
        match self.http.get_json::<T>(&path).await {
            Ok(entity) => Ok(Lookup::Found(entity)),
            Err(Error::HttpStatus { status: 404, .. }) => {
                warn!("{} {id} not found, returning placeholder", T::KIND);
                Ok(Lookup::Missing(T::placeholder(id)))
            }
            Err(e) => Err(e),
        }
    }

    /// Validate, build the URL, and run the traversal the request asks for
    async fn search_entities<T: ApiEntity>(&self, req: &SearchRequest) -> Result<Page<T>> {
        req.validate()?;
        let url = query::collection_url(&self.base_url, T::KIND, req)?;
        let driver = PaginationDriver::new(&self.http);

        if req.drain_all {
            return driver.drain(&url).await;
        }
        if let (Some(start), Some(end)) = (req.start_page, req.end_page) {
            return driver.fetch_window(&url, start, end, req.per_page).await;
        }
        let cursor = resolve_cursor(driver.fetcher(), &url, req.page, req.per_page).await?;
        driver.fetch_page(&url, &cursor, req.per_page).await
    }

    /// The chunked drain shared by all five entity kinds
    async fn drain_chunked(
        &self,
        kind: EntityKind,
        req: &SearchRequest,
        chunk_size: usize,
        target: &ExportTarget,
    ) -> Result<DrainReport> {
        req.validate()?;
        if req.start_page.is_some() || req.end_page.is_some() {
            return Err(Error::validation(
                "a chunked drain cannot be combined with a bounded page window",
            ));
        }
        let url = query::collection_url(&self.base_url, kind, req)?;
        let driver = PaginationDriver::new(&self.http);
        driver.drain_chunked(&url, chunk_size, target).await
    }

    /// Facade-level export of a non-chunked final result
    fn export_results<T: serde::Serialize>(&self, req: &SearchRequest, results: &[T]) -> Result<()> {
        if let Some(target) = &req.export {
            export::write_serializable(target, results)?;
        }
        Ok(())
    }
}

impl Default for OpenAlex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OpenAlex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAlex")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`OpenAlex`]
///
/// `mailto` and `api_key` are sent as query parameters on every request;
/// the remaining knobs configure the transport's retry and rate-limit
/// policy.
#[derive(Debug, Clone)]
pub struct OpenAlexBuilder {
    base_url: String,
    mailto: Option<String>,
    api_key: Option<String>,
    max_retries: u32,
    retry_delay: Duration,
    retry_http_codes: Vec<u16>,
    timeout: Duration,
    rate_limit: Option<RateLimiterConfig>,
}

impl Default for OpenAlexBuilder {
    fn default() -> Self {
        let transport = HttpClientConfig::default();
        Self {
            base_url: BASE_URL.to_string(),
            mailto: None,
            api_key: None,
            max_retries: transport.max_retries,
            retry_delay: transport.retry_delay,
            retry_http_codes: transport.retry_http_codes,
            timeout: transport.timeout,
            rate_limit: transport.rate_limit,
        }
    }
}

impl OpenAlexBuilder {
    /// Contact email; identifies the client for the API's polite pool
    #[must_use]
    pub fn mailto(mut self, email: impl Into<String>) -> Self {
        self.mailto = Some(email.into());
        self
    }

    /// API key for authenticated access
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the API host (tests point this at a mock server)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Maximum transport retries per request
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Initial delay between transport retries
    #[must_use]
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Status codes the transport retries
    #[must_use]
    pub fn retry_http_codes(mut self, codes: impl Into<Vec<u16>>) -> Self {
        self.retry_http_codes = codes.into();
        self
    }

    /// Per-request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the rate limiter configuration
    #[must_use]
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting (tests)
    #[must_use]
    pub fn no_rate_limit(mut self) -> Self {
        self.rate_limit = None;
        self
    }

    /// Build the client
    pub fn build(self) -> OpenAlex {
        let mut transport = HttpClientConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(self.timeout)
            .max_retries(self.max_retries)
            .backoff(
                BackoffType::Exponential,
                self.retry_delay,
                Duration::from_secs(60),
            )
            .retry_http_codes(self.retry_http_codes);
        if let Some(mailto) = &self.mailto {
            transport = transport.query("mailto", mailto);
        }
        if let Some(api_key) = &self.api_key {
            transport = transport.query("api_key", api_key);
        }
        let mut config = transport.build();
        config.rate_limit = self.rate_limit;

        OpenAlex {
            http: HttpClient::with_config(config),
            base_url: self.base_url,
        }
    }
}
