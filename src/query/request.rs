//! Search request parameters and validation

use crate::error::{Error, Result};
use crate::export::ExportTarget;
use crate::pagination::MAX_PER_PAGE;
use crate::types::{FilterValue, Sort};
use std::collections::BTreeMap;

/// Default page size when none is requested
pub const DEFAULT_PER_PAGE: u32 = 25;

/// Parameters for one collection search
///
/// Constructed per call and never mutated after validation. The filter map
/// is a `BTreeMap` so URL construction iterates keys in a stable order.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Free-text search query
    pub query: Option<String>,
    /// Restrict the query to one field (`title`, `abstract`, ...);
    /// requires `query`
    pub search_field: Option<String>,
    /// Page size, 1..=200
    pub per_page: u32,
    /// Page number for single-page fetches (1-based)
    pub page: u32,
    /// Filter clauses, keyed by filter name
    pub filter: BTreeMap<String, FilterValue>,
    /// Group results by a field instead of listing them
    pub group_by: Option<String>,
    /// Sort directive
    pub sort: Option<Sort>,
    /// Fetch every page until the collection is exhausted
    pub drain_all: bool,
    /// First page of a bounded window (inclusive); requires `end_page`
    pub start_page: Option<u32>,
    /// Last page of a bounded window (inclusive); requires `start_page`
    pub end_page: Option<u32>,
    /// Export the final result set once the traversal completes
    pub export: Option<ExportTarget>,
}

impl SearchRequest {
    /// Create a request with default paging (page 1, 25 per page)
    pub fn new() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page: 1,
            ..Self::default()
        }
    }

    /// Set the free-text search query
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Restrict the search query to one field
    #[must_use]
    pub fn search_field(mut self, field: impl Into<String>) -> Self {
        self.search_field = Some(field.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the page number
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Add a filter clause
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter.insert(key.into(), value.into());
        self
    }

    /// Group results by a field
    #[must_use]
    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.group_by = Some(field.into());
        self
    }

    /// Set the sort directive
    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Request a drain of the whole collection
    #[must_use]
    pub fn drain_all(mut self) -> Self {
        self.drain_all = true;
        self
    }

    /// Request a bounded window of pages (inclusive on both ends)
    #[must_use]
    pub fn pages(mut self, start_page: u32, end_page: u32) -> Self {
        self.start_page = Some(start_page);
        self.end_page = Some(end_page);
        self
    }

    /// Export the final result set to this target
    #[must_use]
    pub fn export(mut self, target: ExportTarget) -> Self {
        self.export = Some(target);
        self
    }

    /// Check the request's preconditions.
    ///
    /// Runs before any network call; conflicting parameters are rejected,
    /// never silently corrected.
    pub fn validate(&self) -> Result<()> {
        match (self.start_page, self.end_page) {
            (Some(_), None) => {
                return Err(Error::validation("start_page requires end_page"));
            }
            (None, Some(_)) => {
                return Err(Error::validation("end_page requires start_page"));
            }
            (Some(start), Some(end)) => {
                if self.drain_all {
                    return Err(Error::validation(
                        "a bounded page window cannot be combined with drain_all",
                    ));
                }
                if start < 1 {
                    return Err(Error::validation("start_page is 1-based"));
                }
                if start > end {
                    return Err(Error::validation(format!(
                        "start_page ({start}) must not exceed end_page ({end})"
                    )));
                }
            }
            (None, None) => {}
        }

        if self.search_field.is_some() && self.query.is_none() {
            return Err(Error::validation("search_field requires a search query"));
        }

        if self.per_page < 1 || self.per_page > MAX_PER_PAGE {
            return Err(Error::validation(format!(
                "per_page must be within 1..={MAX_PER_PAGE}, got {}",
                self.per_page
            )));
        }

        Ok(())
    }
}
