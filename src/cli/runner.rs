//! CLI command execution

use super::commands::{Cli, Commands};
use crate::client::{OpenAlex, OpenAlexBuilder};
use crate::error::{Error, Result};
use crate::export::ExportTarget;
use crate::query::SearchRequest;
use crate::types::{
    EntityKind, ExternalId, FilterValue, Lookup, OptionStringExt, Sort, SortOrder,
};
use serde::Serialize;
use std::path::PathBuf;

/// Executes parsed CLI commands against the facade
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the parsed CLI
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    pub async fn run(self) -> Result<()> {
        let client = self.build_client();

        match &self.cli.command {
            Commands::Get {
                kind,
                id,
                namespace,
            } => {
                let kind = parse_kind(kind)?;
                let namespace = namespace.as_deref().map(parse_namespace).transpose()?;
                run_get(&client, kind, id, namespace).await
            }
            Commands::List {
                kind,
                search,
                search_field,
                filter,
                group_by,
                sort,
                page,
                per_page,
                start_page,
                end_page,
                all,
                export_json,
                export_csv,
            } => {
                let kind = parse_kind(kind)?;
                let mut req = SearchRequest::new().page(*page).per_page(*per_page);
                req.query = search.clone().none_if_empty();
                req.search_field = search_field.clone().none_if_empty();
                req.filter = parse_filters(filter)?;
                req.group_by = group_by.clone();
                req.sort = sort.as_deref().map(parse_sort);
                req.start_page = *start_page;
                req.end_page = *end_page;
                req.drain_all = *all;
                req.export = export_target(export_json, export_csv)?;
                run_list(&client, kind, &req).await
            }
            Commands::Drain {
                kind,
                search,
                filter,
                chunk_size,
                export_json,
                export_csv,
            } => {
                let kind = parse_kind(kind)?;
                let mut req = SearchRequest::new();
                req.query = search.clone().none_if_empty();
                req.filter = parse_filters(filter)?;
                let target = export_target(export_json, export_csv)?.ok_or_else(|| {
                    Error::validation("drain requires --export-json or --export-csv")
                })?;
                run_drain(&client, kind, &req, *chunk_size, &target).await
            }
            Commands::Autocomplete { query } => {
                let suggestions = client.autocomplete_works(query).await?;
                print_json(&suggestions)
            }
            Commands::Ngrams { id } => {
                let ngrams = client.work_ngrams(id).await?;
                print_json(&ngrams)
            }
        }
    }

    fn build_client(&self) -> OpenAlex {
        let mut builder = OpenAlexBuilder::default();
        if let Some(mailto) = &self.cli.mailto {
            builder = builder.mailto(mailto);
        }
        if let Some(api_key) = &self.cli.api_key {
            builder = builder.api_key(api_key);
        }
        if let Some(base_url) = &self.cli.base_url {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }
}

async fn run_get(
    client: &OpenAlex,
    kind: EntityKind,
    id: &str,
    namespace: Option<ExternalId>,
) -> Result<()> {
    match kind {
        EntityKind::Works => {
            let lookup = match namespace {
                Some(ns) => client.work_by(ns, id).await?,
                None => client.work(id).await?,
            };
            print_lookup(&lookup)
        }
        EntityKind::Authors => {
            let lookup = match namespace {
                Some(ns) => client.author_by(ns, id).await?,
                None => client.author(id).await?,
            };
            print_lookup(&lookup)
        }
        EntityKind::Sources => {
            let lookup = match namespace {
                Some(ns) => client.source_by(ns, id).await?,
                None => client.source(id).await?,
            };
            print_lookup(&lookup)
        }
        EntityKind::Institutions => {
            let lookup = match namespace {
                Some(ns) => client.institution_by(ns, id).await?,
                None => client.institution(id).await?,
            };
            print_lookup(&lookup)
        }
        EntityKind::Topics => {
            let lookup = match namespace {
                Some(ns) => client.topic_by(ns, id).await?,
                None => client.topic(id).await?,
            };
            print_lookup(&lookup)
        }
    }
}

async fn run_list(client: &OpenAlex, kind: EntityKind, req: &SearchRequest) -> Result<()> {
    match kind {
        EntityKind::Works => print_page(&client.works(req).await?),
        EntityKind::Authors => print_page(&client.authors(req).await?),
        EntityKind::Sources => print_page(&client.sources(req).await?),
        EntityKind::Institutions => print_page(&client.institutions(req).await?),
        EntityKind::Topics => print_page(&client.topics(req).await?),
    }
}

async fn run_drain(
    client: &OpenAlex,
    kind: EntityKind,
    req: &SearchRequest,
    chunk_size: usize,
    target: &ExportTarget,
) -> Result<()> {
    let report = match kind {
        EntityKind::Works => client.drain_works_chunked(req, chunk_size, target).await?,
        EntityKind::Authors => {
            client
                .drain_authors_chunked(req, chunk_size, target)
                .await?
        }
        EntityKind::Sources => {
            client
                .drain_sources_chunked(req, chunk_size, target)
                .await?
        }
        EntityKind::Institutions => {
            client
                .drain_institutions_chunked(req, chunk_size, target)
                .await?
        }
        EntityKind::Topics => client.drain_topics_chunked(req, chunk_size, target).await?,
    };
    print_json(&report)
}

// ============================================================================
// Parsing helpers
// ============================================================================

fn parse_kind(kind: &str) -> Result<EntityKind> {
    kind.parse().map_err(Error::validation)
}

fn parse_namespace(namespace: &str) -> Result<ExternalId> {
    match namespace.to_ascii_lowercase().as_str() {
        "doi" => Ok(ExternalId::Doi),
        "orcid" => Ok(ExternalId::Orcid),
        "issn" => Ok(ExternalId::Issn),
        "ror" => Ok(ExternalId::Ror),
        "wikidata" => Ok(ExternalId::Wikidata),
        "pmid" => Ok(ExternalId::Pmid),
        other => Err(Error::validation(format!(
            "unknown external id namespace: {other}"
        ))),
    }
}

/// Parse repeatable `key=value` filter arguments; comma-joined values
/// become a list
fn parse_filters(
    filters: &[String],
) -> Result<std::collections::BTreeMap<String, FilterValue>> {
    let mut map = std::collections::BTreeMap::new();
    for raw in filters {
        let (key, value) = raw.split_once('=').ok_or_else(|| {
            Error::validation(format!("filter must be key=value, got '{raw}'"))
        })?;
        let value = if value.contains(',') {
            FilterValue::List(value.split(',').map(FilterValue::from).collect())
        } else {
            FilterValue::from(value)
        };
        map.insert(key.to_string(), value);
    }
    Ok(map)
}

/// Parse `field` or `field:desc`
fn parse_sort(sort: &str) -> Sort {
    match sort.strip_suffix(":desc") {
        Some(field) => Sort {
            field: field.to_string(),
            order: SortOrder::Desc,
        },
        None => Sort::asc(sort.strip_suffix(":asc").unwrap_or(sort)),
    }
}

fn export_target(
    json: &Option<PathBuf>,
    csv: &Option<PathBuf>,
) -> Result<Option<ExportTarget>> {
    match (json, csv) {
        (Some(_), Some(_)) => Err(Error::validation(
            "choose one of --export-json or --export-csv",
        )),
        (Some(path), None) => Ok(Some(ExportTarget::json(path.clone()))),
        (None, Some(path)) => Ok(Some(ExportTarget::csv(path.clone()))),
        (None, None) => Ok(None),
    }
}

// ============================================================================
// Output helpers
// ============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_lookup<T: Serialize>(lookup: &Lookup<T>) -> Result<()> {
    if !lookup.is_found() {
        eprintln!("not found; showing placeholder");
    }
    print_json(lookup.entity())
}

fn print_page<T: Serialize>(page: &crate::pagination::Page<T>) -> Result<()> {
    eprintln!(
        "{} results (collection total {})",
        page.results.len(),
        page.meta.count
    );
    print_json(&page.results)
}
