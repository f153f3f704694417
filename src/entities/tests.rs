//! Tests for entity models and transforms

use super::*;
use crate::types::EntityKind;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;

#[test]
fn test_work_deserializes_wire_shape() {
    let work: Work = serde_json::from_value(json!({
        "id": "https://openalex.org/W2741809807",
        "display_name": "The state of OA",
        "publication_year": 2018,
        "publication_date": "2018-02-13",
        "doi": "https://doi.org/10.7717/peerj.4375",
        "type": "article",
        "cited_by_count": 394,
        "is_retracted": false,
        "open_access": {"is_oa": true}
    }))
    .unwrap();

    assert_eq!(work.id, "https://openalex.org/W2741809807");
    assert_eq!(work.publication_year, Some(2018));
    assert_eq!(work.work_type.as_deref(), Some("article"));
    assert_eq!(work.cited_by_count, 394);
    // Unmodeled fields land in `extra`
    assert_eq!(work.extra["open_access"]["is_oa"], true);
}

#[test]
fn test_work_placeholder() {
    let work = Work::placeholder("W999");
    assert_eq!(work.id, "W999");
    assert_eq!(work.display_name, "");
    assert_eq!(work.cited_by_count, 0);
    assert!(work.abstract_inverted_index.is_none());
    assert!(work.extra.is_empty());
}

#[test]
fn test_placeholder_kinds() {
    assert_eq!(Author::KIND, EntityKind::Authors);
    assert_eq!(Source::KIND, EntityKind::Sources);
    assert_eq!(Institution::KIND, EntityKind::Institutions);
    assert_eq!(Topic::KIND, EntityKind::Topics);
    assert_eq!(Work::KIND, EntityKind::Works);

    let author = Author::placeholder("A1");
    assert_eq!(author.id, "A1");
    assert_eq!(author.works_count, 0);
}

#[test]
fn test_reconstruct_abstract_orders_by_position() {
    let mut index = HashMap::new();
    index.insert("despite".to_string(), vec![0]);
    index.insert("growth".to_string(), vec![1]);
    index.insert("of".to_string(), vec![2, 5]);
    index.insert("open".to_string(), vec![3]);
    index.insert("access".to_string(), vec![4]);
    index.insert("works".to_string(), vec![6]);

    assert_eq!(
        reconstruct_abstract(&index),
        "despite growth of open access of works"
    );
}

#[test]
fn test_reconstruct_abstract_empty_index() {
    assert_eq!(reconstruct_abstract(&HashMap::new()), "");
}

#[test]
fn test_work_reconstruct_abstract_is_idempotent() {
    let mut index = HashMap::new();
    index.insert("hello".to_string(), vec![0]);
    index.insert("world".to_string(), vec![1]);

    let mut work = Work {
        abstract_inverted_index: Some(index),
        ..Work::default()
    };
    work.reconstruct_abstract();
    assert_eq!(work.abstract_text.as_deref(), Some("hello world"));

    // A second pass doesn't clobber the reconstructed text
    work.abstract_inverted_index = None;
    work.reconstruct_abstract();
    assert_eq!(work.abstract_text.as_deref(), Some("hello world"));
}

#[test]
fn test_attach_abstracts() {
    let mut index = HashMap::new();
    index.insert("only".to_string(), vec![0]);

    let mut works = vec![
        Work {
            abstract_inverted_index: Some(index),
            ..Work::default()
        },
        Work::default(),
    ];
    attach_abstracts(&mut works);

    assert_eq!(works[0].abstract_text.as_deref(), Some("only"));
    assert!(works[1].abstract_text.is_none());
}

#[test]
fn test_work_serializes_abstract_not_index_name_collision() {
    let mut work = Work::placeholder("W1");
    work.abstract_text = Some("plain text".to_string());

    let value = serde_json::to_value(&work).unwrap();
    assert_eq!(value["abstract"], "plain text");
    assert!(value.get("abstract_text").is_none());
}

#[test]
fn test_ngram_batch_wire_shape() {
    let batch: NgramBatch = serde_json::from_value(json!({
        "meta": {"count": 2},
        "ngrams": [
            {"ngram": "open access", "ngram_count": 9, "ngram_tokens": 2, "term_frequency": 0.001},
            {"ngram": "access", "ngram_count": 12, "ngram_tokens": 1, "term_frequency": 0.002}
        ]
    }))
    .unwrap();

    assert_eq!(batch.meta.count, 2);
    assert_eq!(batch.ngrams.len(), 2);
    assert_eq!(batch.ngrams[0].ngram, "open access");
}

#[test]
fn test_autocomplete_defaults() {
    let suggestion: Autocomplete = serde_json::from_value(json!({
        "id": "https://openalex.org/W1",
        "display_name": "A title"
    }))
    .unwrap();

    assert_eq!(suggestion.display_name, "A title");
    assert!(suggestion.hint.is_none());
    assert_eq!(suggestion.cited_by_count, 0);
}
