//! CLI module
//!
//! Command-line interface over the client facade.
//!
//! # Commands
//!
//! - `get` - Fetch a single entity by id
//! - `list` - Search a collection (single page, window, or full drain)
//! - `drain` - Drain a collection to disk in chunks
//! - `autocomplete` - Autocomplete works for a partial query
//! - `ngrams` - Fulltext n-grams for one work

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
