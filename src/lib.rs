// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # OpenAlex Client
//!
//! Typed client for the [OpenAlex](https://openalex.org) scholarly catalog
//! API: works, authors, sources, institutions, and topics.
//!
//! ## Features
//!
//! - **Typed Search**: Filter DSL, field-scoped search, group-by, and sort
//! - **Cursor Pagination**: Single page, bounded page windows, and
//!   drain-to-completion over the API's forward-only cursors
//! - **Chunked Export**: Drain entire collections to JSON or CSV in bounded
//!   memory, flushing fixed-size chunks as they fill
//! - **Polite Transport**: Retries with backoff, `Retry-After` handling, and
//!   a token-bucket rate limiter tuned to the API's courtesy limit
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use openalex_client::{OpenAlex, SearchRequest, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = OpenAlex::builder()
//!         .mailto("you@example.org")
//!         .build();
//!
//!     // One page of works about coffee
//!     let req = SearchRequest::new().query("coffee").per_page(50);
//!     let page = client.works(&req).await?;
//!     println!("{} of {} results", page.results.len(), page.meta.count);
//!
//!     // Single lookup; a 404 comes back as a placeholder, not an error
//!     let work = client.work("W2741809807").await?;
//!     println!("found: {}", work.is_found());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        OpenAlex Facade                         │
//! │  work()/works()  author()/authors()  ...  drain_*_chunked()    │
//! └────────────────────────────────────────────────────────────────┘
//!                │
//! ┌──────────┬───┴───────┬───────────────┬───────────┬────────────┐
//! │  Query   │   HTTP    │  Pagination   │  Export   │  Entities  │
//! ├──────────┼───────────┼───────────────┼───────────┼────────────┤
//! │ Filters  │ GET       │ Cursor        │ JSON      │ Work       │
//! │ Search   │ Retry     │ Resolver      │ CSV       │ Author     │
//! │ Sort     │ Rate limit│ Window        │ Chunks    │ Source ... │
//! │ Group-by │ Backoff   │ Drain         │           │ Abstracts  │
//! └──────────┴───────────┴───────────────┴───────────┴────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with retry and rate limiting
pub mod http;

/// Search requests and URL construction
pub mod query;

/// Cursor pagination: fetcher, resolver, and traversal driver
pub mod pagination;

/// JSON/CSV export sinks
pub mod export;

/// Entity models and pure data transforms
pub mod entities;

/// The OpenAlex facade: one method family per entity kind
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{OpenAlex, OpenAlexBuilder};
pub use entities::{Author, Autocomplete, Institution, Ngram, Source, Topic, Work};
pub use error::{Error, Result};
pub use export::{DrainReport, ExportFormat, ExportTarget};
pub use pagination::{Cursor, Page, PageMeta, MAX_PER_PAGE};
pub use query::SearchRequest;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
