//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// OpenAlex command-line client
#[derive(Parser, Debug)]
#[command(name = "openalex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Contact email for the API's polite pool
    #[arg(long, global = true)]
    pub mailto: Option<String>,

    /// API key for authenticated access
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Override the API host
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single entity by id
    Get {
        /// Entity kind (work, author, source, institution, topic)
        kind: String,

        /// OpenAlex id, or an external id when --namespace is given
        id: String,

        /// External id namespace (doi, orcid, issn, ror, wikidata, pmid)
        #[arg(long)]
        namespace: Option<String>,
    },

    /// Search a collection
    List {
        /// Entity kind (works, authors, sources, institutions, topics)
        kind: String,

        /// Free-text search query
        #[arg(long)]
        search: Option<String>,

        /// Restrict the search query to one field
        #[arg(long)]
        search_field: Option<String>,

        /// Filter clause, key=value (repeatable; comma-join multi-values)
        #[arg(short, long)]
        filter: Vec<String>,

        /// Group results by a field
        #[arg(long)]
        group_by: Option<String>,

        /// Sort directive, `field` or `field:desc`
        #[arg(long)]
        sort: Option<String>,

        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,

        /// Page size (1..=200)
        #[arg(long, default_value = "25")]
        per_page: u32,

        /// First page of a bounded window (requires --end-page)
        #[arg(long)]
        start_page: Option<u32>,

        /// Last page of a bounded window (requires --start-page)
        #[arg(long)]
        end_page: Option<u32>,

        /// Fetch every page until the collection is exhausted
        #[arg(long)]
        all: bool,

        /// Export the results to a JSON file
        #[arg(long)]
        export_json: Option<PathBuf>,

        /// Export the results to a CSV file
        #[arg(long)]
        export_csv: Option<PathBuf>,
    },

    /// Drain a collection to disk in fixed-size chunks
    Drain {
        /// Entity kind (works, authors, sources, institutions, topics)
        kind: String,

        /// Free-text search query
        #[arg(long)]
        search: Option<String>,

        /// Filter clause, key=value (repeatable)
        #[arg(short, long)]
        filter: Vec<String>,

        /// Records per chunk
        #[arg(long, default_value = "10000")]
        chunk_size: usize,

        /// Chunk files as JSON, named after this path
        #[arg(long)]
        export_json: Option<PathBuf>,

        /// Chunk files as CSV, named after this path
        #[arg(long)]
        export_csv: Option<PathBuf>,
    },

    /// Autocomplete works for a partial query
    Autocomplete {
        /// Partial query
        query: String,
    },

    /// Fulltext n-grams for one work
    Ngrams {
        /// Work id
        id: String,
    },
}
