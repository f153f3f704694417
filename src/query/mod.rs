//! Search requests and URL construction
//!
//! `SearchRequest` carries everything a collection search can express;
//! `builder` turns one into a fully-qualified collection URL. URL
//! construction is pure and deterministic — identical inputs always yield
//! byte-identical URLs.

mod builder;
mod request;

pub use builder::collection_url;
pub use request::SearchRequest;

#[cfg(test)]
mod tests;
