//! Entity model definitions and pure data transforms

use super::ApiEntity;
use crate::pagination::PageMeta;
use crate::types::EntityKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unmodeled wire fields, preserved for export fidelity
pub type Extra = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// Work
// ============================================================================

/// A scholarly work: article, book, dataset, ...
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Work {
    pub id: String,
    pub display_name: String,
    pub publication_year: Option<i32>,
    pub publication_date: Option<String>,
    pub doi: Option<String>,
    #[serde(rename = "type")]
    pub work_type: Option<String>,
    pub language: Option<String>,
    pub cited_by_count: u64,
    pub is_retracted: bool,
    /// Relevance when the result came from a search
    pub relevance_score: Option<f64>,
    /// The API ships abstracts as word → positions; see
    /// [`reconstruct_abstract`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstract_inverted_index: Option<HashMap<String, Vec<u32>>>,
    /// Plain-text abstract, reconstructed client-side
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Work {
    /// Fill `abstract_text` from the inverted index if it isn't set yet
    pub fn reconstruct_abstract(&mut self) {
        if self.abstract_text.is_none() {
            if let Some(index) = &self.abstract_inverted_index {
                self.abstract_text = Some(reconstruct_abstract(index));
            }
        }
    }
}

impl ApiEntity for Work {
    const KIND: EntityKind = EntityKind::Works;

    fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }
}

// ============================================================================
// Author
// ============================================================================

/// An author of scholarly works
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub id: String,
    pub display_name: String,
    pub orcid: Option<String>,
    pub works_count: u64,
    pub cited_by_count: u64,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ApiEntity for Author {
    const KIND: EntityKind = EntityKind::Authors;

    fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }
}

// ============================================================================
// Source
// ============================================================================

/// A source: journal, conference, repository, ...
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    pub id: String,
    pub display_name: String,
    pub issn_l: Option<String>,
    pub issn: Option<Vec<String>>,
    pub is_oa: bool,
    pub works_count: u64,
    pub cited_by_count: u64,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ApiEntity for Source {
    const KIND: EntityKind = EntityKind::Sources;

    fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }
}

// ============================================================================
// Institution
// ============================================================================

/// A research institution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Institution {
    pub id: String,
    pub display_name: String,
    pub ror: Option<String>,
    pub country_code: Option<String>,
    pub works_count: u64,
    pub cited_by_count: u64,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ApiEntity for Institution {
    const KIND: EntityKind = EntityKind::Institutions;

    fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }
}

// ============================================================================
// Topic
// ============================================================================

/// A research topic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topic {
    pub id: String,
    pub display_name: String,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub works_count: u64,
    pub cited_by_count: u64,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ApiEntity for Topic {
    const KIND: EntityKind = EntityKind::Topics;

    fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }
}

// ============================================================================
// Autocomplete & N-grams
// ============================================================================

/// One autocomplete suggestion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Autocomplete {
    pub id: String,
    pub display_name: String,
    pub hint: Option<String>,
    pub cited_by_count: u64,
    pub entity_type: Option<String>,
    pub external_id: Option<String>,
}

/// One n-gram of a work's fulltext
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ngram {
    pub ngram: String,
    pub ngram_count: u64,
    pub ngram_tokens: u32,
    pub term_frequency: f64,
}

/// Wire shape of the n-gram endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NgramBatch {
    pub ngrams: Vec<Ngram>,
    pub meta: PageMeta,
}

// ============================================================================
// Abstract reconstruction
// ============================================================================

/// Rebuild a plain-text abstract from its inverted-index representation.
///
/// The index maps each word to the positions it occupies; sorting every
/// (position, word) pair recovers the original token order. Pure transform,
/// deterministic regardless of map iteration order.
pub fn reconstruct_abstract(index: &HashMap<String, Vec<u32>>) -> String {
    let mut slots: Vec<(u32, &str)> = Vec::new();
    for (word, positions) in index {
        for &position in positions {
            slots.push((position, word.as_str()));
        }
    }
    slots.sort_unstable();

    let words: Vec<&str> = slots.iter().map(|(_, word)| *word).collect();
    words.join(" ")
}

/// Reconstruct abstracts across a page of works
pub fn attach_abstracts(works: &mut [Work]) {
    for work in works {
        work.reconstruct_abstract();
    }
}
