//! Common types used throughout the OpenAlex client
//!
//! This module contains shared type definitions used across multiple
//! modules: entity kinds, filter values, sort specs, and lookup results.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Entity Kind
// ============================================================================

/// The five entity collections exposed by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Works,
    Authors,
    Sources,
    Institutions,
    Topics,
}

impl EntityKind {
    /// URL path segment for this collection
    pub fn path(self) -> &'static str {
        match self {
            EntityKind::Works => "works",
            EntityKind::Authors => "authors",
            EntityKind::Sources => "sources",
            EntityKind::Institutions => "institutions",
            EntityKind::Topics => "topics",
        }
    }

    /// All entity kinds, in canonical order
    pub fn all() -> [EntityKind; 5] {
        [
            EntityKind::Works,
            EntityKind::Authors,
            EntityKind::Sources,
            EntityKind::Institutions,
            EntityKind::Topics,
        ]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "work" | "works" => Ok(EntityKind::Works),
            "author" | "authors" => Ok(EntityKind::Authors),
            "source" | "sources" => Ok(EntityKind::Sources),
            "institution" | "institutions" => Ok(EntityKind::Institutions),
            "topic" | "topics" => Ok(EntityKind::Topics),
            other => Err(format!("unknown entity kind: {other}")),
        }
    }
}

// ============================================================================
// External ID Namespaces
// ============================================================================

/// External identifier namespaces accepted by `/<collection>/<namespace>:<id>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalId {
    Doi,
    Orcid,
    Issn,
    Ror,
    Wikidata,
    Pmid,
}

impl ExternalId {
    /// Namespace prefix as it appears in the URL
    pub fn as_str(self) -> &'static str {
        match self {
            ExternalId::Doi => "doi",
            ExternalId::Orcid => "orcid",
            ExternalId::Issn => "issn",
            ExternalId::Ror => "ror",
            ExternalId::Wikidata => "wikidata",
            ExternalId::Pmid => "pmid",
        }
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Sort
// ============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Sort directive: a field and a direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    /// Field to sort by (e.g. `cited_by_count`, `publication_date`)
    pub field: String,
    /// Sort direction
    pub order: SortOrder,
}

impl Sort {
    /// Sort ascending by a field
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    /// Sort descending by a field
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order {
            SortOrder::Asc => f.write_str(&self.field),
            SortOrder::Desc => write!(f, "{}:desc", self.field),
        }
    }
}

// ============================================================================
// Filter Values
// ============================================================================

/// A scalar or list value in the filter DSL
///
/// Lists render comma-joined inside a single `key:value` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<FilterValue>),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Str(s) => f.write_str(s),
            FilterValue::Int(i) => write!(f, "{i}"),
            FilterValue::Float(x) => write!(f, "{x}"),
            FilterValue::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            FilterValue::List(values) => {
                let joined = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                f.write_str(&joined)
            }
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Str(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Str(s)
    }
}

impl From<i64> for FilterValue {
    fn from(i: i64) -> Self {
        FilterValue::Int(i)
    }
}

impl From<i32> for FilterValue {
    fn from(i: i32) -> Self {
        FilterValue::Int(i64::from(i))
    }
}

impl From<f64> for FilterValue {
    fn from(x: f64) -> Self {
        FilterValue::Float(x)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl<V: Into<FilterValue>> From<Vec<V>> for FilterValue {
    fn from(values: Vec<V>) -> Self {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// Lookup Result
// ============================================================================

/// Outcome of a single-entity lookup
///
/// A 404 from the API is not an error for lookups: `Missing` carries a
/// placeholder entity with the requested id and empty collections, so
/// callers keep the ergonomics of always having an entity while the
/// found/not-found distinction stays observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Lookup<T> {
    /// The entity exists and was fetched
    Found(T),
    /// HTTP 404; the payload is a placeholder, not API data
    Missing(T),
}

impl<T> Lookup<T> {
    /// Whether the entity was found
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// The entity or its placeholder
    pub fn entity(&self) -> &T {
        match self {
            Lookup::Found(entity) | Lookup::Missing(entity) => entity,
        }
    }

    /// Consume into the entity or its placeholder
    pub fn into_inner(self) -> T {
        match self {
            Lookup::Found(entity) | Lookup::Missing(entity) => entity,
        }
    }

    /// The entity, or `None` if it was a placeholder
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(entity) => Some(entity),
            Lookup::Missing(_) => None,
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
