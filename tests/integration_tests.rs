//! Facade-level integration tests
//!
//! Exercises the full pipeline — validation, URL construction, cursor
//! traversal, export — against a wiremock server standing in for the API.

use openalex_client::{
    EntityKind, ExportTarget, ExternalId, OpenAlex, SearchRequest, Sort,
};
use serde_json::{json, Value};
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> OpenAlex {
    OpenAlex::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build()
}

// ============================================================================
// Single-entity lookups
// ============================================================================

#[tokio::test]
async fn work_lookup_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/W2741809807"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "https://openalex.org/W2741809807",
            "display_name": "The state of OA",
            "publication_year": 2018,
            "cited_by_count": 394
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let lookup = client.work("W2741809807").await.unwrap();

    assert!(lookup.is_found());
    assert_eq!(lookup.entity().publication_year, Some(2018));
}

#[tokio::test]
async fn work_lookup_404_yields_placeholder() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/W0"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let lookup = client.work("W0").await.unwrap();

    assert!(!lookup.is_found());
    let placeholder = lookup.into_inner();
    assert_eq!(placeholder.id, "W0");
    assert_eq!(placeholder.display_name, "");
    assert_eq!(placeholder.cited_by_count, 0);
}

#[tokio::test]
async fn author_lookup_by_orcid_uses_namespace_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authors/orcid:0000-0002-1825-0097"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "https://openalex.org/A5023888391",
            "display_name": "Josiah Carberry",
            "works_count": 12
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let lookup = client
        .author_by(ExternalId::Orcid, "0000-0002-1825-0097")
        .await
        .unwrap();

    assert!(lookup.is_found());
    assert_eq!(lookup.entity().works_count, 12);
}

#[tokio::test]
async fn source_lookup_non_404_error_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sources/S1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.source("S1").await.unwrap_err();
    assert_eq!(err.status(), Some(403));
}

// ============================================================================
// Collection searches
// ============================================================================

#[tokio::test]
async fn works_single_page_with_search_and_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("search", "coffee"))
        .and(query_param("filter", "is_oa:true,publication_year:2020"))
        .and(query_param("sort", "cited_by_count:desc"))
        .and(query_param("cursor", "*"))
        .and(query_param("per-page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "W1", "display_name": "Coffee and health"}],
            "meta": {"count": 1, "page": 1, "per_page": 50}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = SearchRequest::new()
        .query("coffee")
        .filter("is_oa", true)
        .filter("publication_year", 2020)
        .sort(Sort::desc("cited_by_count"))
        .per_page(50);

    let page = client.works(&req).await.unwrap();
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.meta.count, 1);
}

#[tokio::test]
async fn works_search_reconstructs_abstracts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": "W1",
                "display_name": "Inverted",
                "abstract_inverted_index": {"open": [0], "science": [1]}
            }],
            "meta": {"count": 1, "per_page": 25}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = client.works(&SearchRequest::new()).await.unwrap();

    assert_eq!(
        page.results[0].abstract_text.as_deref(),
        Some("open science")
    );
}

#[tokio::test]
async fn works_bounded_window_via_request() {
    let server = MockServer::start().await;

    let mount = |cursor: &'static str, id: &'static str, next: Option<&'static str>| {
        Mock::given(method("GET"))
            .and(path("/works"))
            .and(query_param("cursor", cursor))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": id}],
                "meta": {"count": 3, "per_page": 1, "next_cursor": next}
            })))
            .mount(&server)
    };
    mount("*", "W1", Some("c2")).await;
    mount("c2", "W2", Some("c3")).await;
    mount("c3", "W3", None).await;

    let client = test_client(&server);
    let req = SearchRequest::new().per_page(1).pages(2, 3);
    let page = client.works(&req).await.unwrap();

    let ids: Vec<&str> = page.results.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["W2", "W3"]);
    assert_eq!(page.meta.page, Some(2));
}

#[tokio::test]
async fn authors_drain_all_via_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authors"))
        .and(query_param("cursor", "*"))
        .and(query_param("per-page", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "A1"}, {"id": "A2"}],
            "meta": {"count": 2, "per_page": 200, "next_cursor": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = SearchRequest::new().drain_all();
    let page = client.authors(&req).await.unwrap();

    assert_eq!(page.results.len(), 2);
}

#[tokio::test]
async fn topics_group_by_only_builds_group_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/topics"))
        .and(query_param("group_by", "domain.id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "meta": {"count": 0, "per_page": 25}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = SearchRequest::new().group_by("domain.id");
    let page = client.topics(&req).await.unwrap();
    assert!(page.results.is_empty());
}

// ============================================================================
// Validation happens before any network call
// ============================================================================

#[tokio::test]
async fn window_plus_drain_is_rejected_without_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = SearchRequest::new().pages(1, 3).drain_all();
    let err = client.works(&req).await.unwrap_err();

    assert!(matches!(
        err,
        openalex_client::Error::Validation { .. }
    ));
}

#[tokio::test]
async fn chunked_drain_rejects_bounded_window() {
    let server = MockServer::start().await;
    let client = test_client(&server);
    let dir = tempdir().unwrap();

    let req = SearchRequest::new().pages(1, 3);
    let err = client
        .drain_works_chunked(&req, 100, &ExportTarget::json(dir.path().join("w.json")))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        openalex_client::Error::Validation { .. }
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Transport identification
// ============================================================================

#[tokio::test]
async fn mailto_and_api_key_decorate_every_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/W1"))
        .and(query_param("mailto", "you@example.org"))
        .and(query_param("api_key", "k123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "W1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAlex::builder()
        .base_url(server.uri())
        .mailto("you@example.org")
        .api_key("k123")
        .no_rate_limit()
        .build();

    let lookup = client.work("W1").await.unwrap();
    assert!(lookup.is_found());
}

// ============================================================================
// Autocomplete & n-grams
// ============================================================================

#[tokio::test]
async fn autocomplete_works() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/autocomplete/works"))
        .and(query_param("q", "the state of"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": "W1", "display_name": "The state of OA", "cited_by_count": 394}
            ],
            "meta": {"count": 1}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let suggestions = client.autocomplete_works("the state of").await.unwrap();

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].display_name, "The state of OA");
}

#[tokio::test]
async fn work_ngrams() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/W1/ngram"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"count": 1},
            "ngrams": [
                {"ngram": "open access", "ngram_count": 9, "ngram_tokens": 2, "term_frequency": 0.001}
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let ngrams = client.work_ngrams("W1").await.unwrap();

    assert_eq!(ngrams.len(), 1);
    assert_eq!(ngrams[0].ngram_count, 9);
}

// ============================================================================
// Export
// ============================================================================

#[tokio::test]
async fn single_shot_export_writes_final_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/institutions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": "I1", "display_name": "MIT", "country_code": "US"},
                {"id": "I2", "display_name": "ETH", "country_code": "CH"}
            ],
            "meta": {"count": 2, "per_page": 25}
        })))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let out = dir.path().join("institutions.csv");

    let client = test_client(&server);
    let req = SearchRequest::new().export(ExportTarget::csv(&out));
    let page = client.institutions(&req).await.unwrap();

    // The page still comes back in memory AND lands on disk
    assert_eq!(page.results.len(), 2);
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.lines().next().unwrap().contains("country_code"));
    assert_eq!(written.lines().count(), 3);
}

#[tokio::test]
async fn facade_chunked_drain_returns_report_not_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sources"))
        .and(query_param("cursor", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "S1"}, {"id": "S2"}, {"id": "S3"}],
            "meta": {"count": 3, "per_page": 200, "next_cursor": null}
        })))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let target = ExportTarget::json(dir.path().join("sources.json"));

    let client = test_client(&server);
    let report = client
        .drain_sources_chunked(&SearchRequest::new(), 2, &target)
        .await
        .unwrap();

    assert_eq!(report.chunks_written, 2);
    assert_eq!(report.records_exported, 3);
    assert!(dir.path().join("sources_1.json").exists());
    assert!(dir.path().join("sources_2.json").exists());

    let chunk: Vec<Value> = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("sources_2.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(chunk.len(), 1);
    assert_eq!(chunk[0]["id"], "S3");
}

// ============================================================================
// Misc
// ============================================================================

#[test]
fn entity_kind_paths_cover_all_collections() {
    let paths: Vec<&str> = EntityKind::all().iter().map(|k| k.path()).collect();
    assert_eq!(
        paths,
        vec!["works", "authors", "sources", "institutions", "topics"]
    );
}
