//! Tests for search requests and URL construction

use super::*;
use crate::export::ExportTarget;
use crate::types::{EntityKind, Sort};
use pretty_assertions::assert_eq;
use test_case::test_case;

const BASE: &str = "https://api.openalex.org";

// ============================================================================
// URL Builder Tests
// ============================================================================

#[test]
fn test_url_plain_collection() {
    let req = SearchRequest::new();
    let url = collection_url(BASE, EntityKind::Works, &req).unwrap();
    assert_eq!(url, "https://api.openalex.org/works");
}

#[test]
fn test_url_search() {
    let req = SearchRequest::new().query("machine learning");
    let url = collection_url(BASE, EntityKind::Works, &req).unwrap();
    assert_eq!(
        url,
        "https://api.openalex.org/works?search=machine+learning"
    );
}

#[test]
fn test_url_search_field_becomes_filter_clause() {
    let req = SearchRequest::new().query("dna").search_field("title");
    let url = collection_url(BASE, EntityKind::Works, &req).unwrap();
    assert_eq!(
        url,
        "https://api.openalex.org/works?filter=title.search%3Adna"
    );
    assert!(!url.contains("search="));
}

#[test]
fn test_url_filter_clauses_ordered_by_key() {
    let req = SearchRequest::new()
        .filter("publication_year", 2020)
        .filter("is_oa", true)
        .filter("authorships.author.id", "A5023888391");
    let url = collection_url(BASE, EntityKind::Works, &req).unwrap();
    // BTreeMap iteration: authorships < is_oa < publication_year
    assert_eq!(
        url,
        "https://api.openalex.org/works?filter=authorships.author.id%3AA5023888391%2Cis_oa%3Atrue%2Cpublication_year%3A2020"
    );
}

#[test]
fn test_url_multi_value_filter_comma_joined() {
    let req = SearchRequest::new().filter("publication_year", vec![2019, 2020]);
    let url = collection_url(BASE, EntityKind::Works, &req).unwrap();
    assert!(url.contains("publication_year%3A2019%2C2020"));
}

#[test]
fn test_url_group_by_and_sort() {
    let req = SearchRequest::new()
        .group_by("publication_year")
        .sort(Sort::desc("cited_by_count"));
    let url = collection_url(BASE, EntityKind::Authors, &req).unwrap();
    assert_eq!(
        url,
        "https://api.openalex.org/authors?group_by=publication_year&sort=cited_by_count%3Adesc"
    );
}

#[test]
fn test_url_parameter_order_is_fixed() {
    let req = SearchRequest::new()
        .query("coffee")
        .filter("is_oa", true)
        .group_by("type")
        .sort(Sort::asc("display_name"));
    let url = collection_url(BASE, EntityKind::Sources, &req).unwrap();

    let search_pos = url.find("search=").unwrap();
    let filter_pos = url.find("filter=").unwrap();
    let group_pos = url.find("group_by=").unwrap();
    let sort_pos = url.find("sort=").unwrap();
    assert!(search_pos < filter_pos);
    assert!(filter_pos < group_pos);
    assert!(group_pos < sort_pos);
}

#[test]
fn test_url_determinism() {
    let build = || {
        let req = SearchRequest::new()
            .query("solar energy")
            .filter("publication_year", vec![2021, 2022])
            .filter("is_oa", true)
            .sort(Sort::desc("relevance_score"));
        collection_url(BASE, EntityKind::Works, &req).unwrap()
    };
    assert_eq!(build(), build());
}

#[test]
fn test_url_trailing_slash_on_base() {
    let req = SearchRequest::new();
    let url = collection_url("https://api.openalex.org/", EntityKind::Topics, &req).unwrap();
    assert_eq!(url, "https://api.openalex.org/topics");
}

// ============================================================================
// SearchRequest Validation Tests
// ============================================================================

#[test]
fn test_validate_default_ok() {
    assert!(SearchRequest::new().validate().is_ok());
}

#[test]
fn test_validate_window_ok() {
    assert!(SearchRequest::new().pages(2, 4).validate().is_ok());
    assert!(SearchRequest::new().pages(3, 3).validate().is_ok());
}

#[test]
fn test_validate_start_without_end() {
    let mut req = SearchRequest::new();
    req.start_page = Some(2);
    let err = req.validate().unwrap_err();
    assert!(err.to_string().contains("start_page requires end_page"));
}

#[test]
fn test_validate_end_without_start() {
    let mut req = SearchRequest::new();
    req.end_page = Some(4);
    assert!(req.validate().is_err());
}

#[test]
fn test_validate_window_and_drain_conflict() {
    let req = SearchRequest::new().pages(1, 3).drain_all();
    let err = req.validate().unwrap_err();
    assert!(matches!(err, crate::error::Error::Validation { .. }));
}

#[test]
fn test_validate_inverted_window() {
    let req = SearchRequest::new().pages(5, 2);
    assert!(req.validate().is_err());
}

#[test]
fn test_validate_zero_start_page() {
    let req = SearchRequest::new().pages(0, 2);
    assert!(req.validate().is_err());
}

#[test]
fn test_validate_search_field_without_query() {
    let req = SearchRequest::new().search_field("title");
    let err = req.validate().unwrap_err();
    assert!(err.to_string().contains("search_field requires"));
}

#[test]
fn test_validate_search_field_with_query_ok() {
    let req = SearchRequest::new().query("dna").search_field("title");
    assert!(req.validate().is_ok());
}

#[test_case(0, false; "zero")]
#[test_case(1, true; "minimum")]
#[test_case(25, true; "default")]
#[test_case(200, true; "maximum")]
#[test_case(201, false; "over maximum")]
fn test_validate_per_page_bounds(per_page: u32, ok: bool) {
    assert_eq!(
        SearchRequest::new().per_page(per_page).validate().is_ok(),
        ok
    );
}

#[test]
fn test_request_builder_accumulates() {
    let req = SearchRequest::new()
        .query("coffee")
        .per_page(50)
        .page(3)
        .filter("is_oa", true)
        .export(ExportTarget::json("out.json"));

    assert_eq!(req.query.as_deref(), Some("coffee"));
    assert_eq!(req.per_page, 50);
    assert_eq!(req.page, 3);
    assert_eq!(req.filter.len(), 1);
    assert!(req.export.is_some());
}
