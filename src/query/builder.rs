//! Collection URL construction
//!
//! Builds the base collection URL for a search: path segment plus `search`,
//! `filter`, `group_by`, and `sort` query parameters. Pagination parameters
//! (`cursor`, `per-page`) are appended later by the page fetcher.
//!
//! The output is a pure function of the inputs. Parameters are emitted in a
//! fixed order and filter clauses follow the map's key order, so rebuilding
//! with identical inputs yields a byte-identical URL.

use crate::error::Result;
use crate::query::SearchRequest;
use crate::types::EntityKind;
use url::Url;

/// Build the collection URL for a search request.
///
/// Filter DSL: each clause is `key:value`, multi-values are comma-joined
/// inside the clause, and clauses are comma-joined in the `filter`
/// parameter. A `search_field` folds the free-text query into a
/// `{field}.search:{query}` clause instead of the `search` parameter.
///
/// Malformed filter values pass through as-is; validation belongs to the
/// caller.
pub fn collection_url(base_url: &str, kind: EntityKind, req: &SearchRequest) -> Result<String> {
    let base = base_url.trim_end_matches('/');
    let mut url = Url::parse(&format!("{base}/{}", kind.path()))?;

    {
        let mut pairs = url.query_pairs_mut();

        // Free-text search, unless scoped to a field (then it becomes a
        // filter clause below)
        if let (Some(query), None) = (&req.query, &req.search_field) {
            pairs.append_pair("search", query);
        }

        let mut clauses: Vec<String> = req
            .filter
            .iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect();
        if let (Some(query), Some(field)) = (&req.query, &req.search_field) {
            clauses.push(format!("{field}.search:{query}"));
        }
        if !clauses.is_empty() {
            pairs.append_pair("filter", &clauses.join(","));
        }

        if let Some(group_by) = &req.group_by {
            pairs.append_pair("group_by", group_by);
        }

        if let Some(sort) = &req.sort {
            pairs.append_pair("sort", &sort.to_string());
        }
    }

    // query_pairs_mut leaves a dangling "?" when nothing was appended
    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url.to_string())
}
