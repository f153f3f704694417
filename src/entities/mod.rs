//! Entity models
//!
//! Typed models for the five catalog collections plus autocomplete
//! suggestions and work n-grams. Each model keeps unmodeled wire fields in
//! a flattened map so exports stay faithful to the API payload.

mod types;

pub use types::{
    attach_abstracts, reconstruct_abstract, Author, Autocomplete, Institution, Ngram, NgramBatch,
    Source, Topic, Work,
};

use crate::types::EntityKind;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A catalog entity: knows its collection and how to build the placeholder
/// returned for 404 lookups
pub trait ApiEntity: DeserializeOwned + Serialize {
    /// The collection this entity lives in
    const KIND: EntityKind;

    /// Placeholder with the requested id and empty collections, used when
    /// the API reports the entity missing
    fn placeholder(id: &str) -> Self;
}

#[cfg(test)]
mod tests;
