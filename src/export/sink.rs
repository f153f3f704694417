//! JSON and CSV file sinks

use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output format for an export target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array
    Json,
    /// Flattened tabular projection
    Csv,
}

impl ExportFormat {
    /// Canonical file extension
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Where and how to write exported results
#[derive(Debug, Clone)]
pub struct ExportTarget {
    /// Output file path
    pub path: PathBuf,
    /// Output format
    pub format: ExportFormat,
}

impl ExportTarget {
    /// Export to a JSON file
    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: ExportFormat::Json,
        }
    }

    /// Export to a CSV file
    pub fn csv(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: ExportFormat::Csv,
        }
    }

    /// Path for one chunk of a chunked drain: the stem gets `_{index}`
    /// appended, the extension stays
    pub fn chunk_path(&self, index: usize) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("export");
        let file_name = format!("{stem}_{index}.{}", self.format.extension());
        self.path.with_file_name(file_name)
    }
}

/// Outcome of a chunked drain
///
/// Chunked mode never returns records to the caller; this report is the
/// only in-memory artifact.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrainReport {
    /// Number of chunks flushed
    pub chunks_written: usize,
    /// Total records exported across all chunks
    pub records_exported: usize,
    /// Paths of the files written, in flush order
    pub files: Vec<PathBuf>,
}

impl DrainReport {
    /// Record one flushed chunk
    pub fn add_chunk(&mut self, path: PathBuf, records: usize) {
        self.chunks_written += 1;
        self.records_exported += records;
        self.files.push(path);
    }
}

/// Write a result sequence to the target
pub fn write_records(target: &ExportTarget, records: &[Value]) -> Result<()> {
    match target.format {
        ExportFormat::Json => write_json(&target.path, records),
        ExportFormat::Csv => write_csv(&target.path, records),
    }?;
    debug!("exported {} records to {}", records.len(), target.path.display());
    Ok(())
}

/// Serialize typed results and write them to the target
pub fn write_serializable<T: Serialize>(target: &ExportTarget, records: &[T]) -> Result<()> {
    let values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    write_records(target, &values)
}

/// Write one chunk of a chunked drain, returning the path written
pub fn write_chunk(target: &ExportTarget, index: usize, records: &[Value]) -> Result<PathBuf> {
    let path = target.chunk_path(index);
    let chunk_target = ExportTarget {
        path: path.clone(),
        format: target.format,
    };
    write_records(&chunk_target, records)?;
    Ok(path)
}

fn write_json(path: &Path, records: &[Value]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

fn write_csv(path: &Path, records: &[Value]) -> Result<()> {
    let rows: Vec<BTreeMap<String, String>> = records.iter().map(flatten_record).collect();

    // Header is the sorted union of keys across all rows, so every record
    // projects onto the same columns
    let mut columns: BTreeSet<String> = BTreeSet::new();
    for row in &rows {
        columns.extend(row.keys().cloned());
    }

    let mut writer = csv::Writer::from_path(path)?;
    if columns.is_empty() {
        writer.flush()?;
        return Ok(());
    }
    writer.write_record(&columns)?;
    for row in &rows {
        let record: Vec<&str> = columns
            .iter()
            .map(|column| row.get(column).map_or("", String::as_str))
            .collect();
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Flatten one result object into dot-keyed cells.
///
/// Nested objects flatten recursively (`ids.doi`); arrays and non-object
/// roots serialize to a JSON string cell; null becomes an empty cell.
fn flatten_record(record: &Value) -> BTreeMap<String, String> {
    let mut cells = BTreeMap::new();
    match record {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_into(key, value, &mut cells);
            }
        }
        other => {
            cells.insert("value".to_string(), scalar_cell(other));
        }
    }
    cells
}

fn flatten_into(prefix: &str, value: &Value, cells: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                flatten_into(&format!("{prefix}.{key}"), nested, cells);
            }
        }
        other => {
            cells.insert(prefix.to_string(), scalar_cell(other));
        }
    }
}

fn scalar_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(_) => serde_json::to_string(value).unwrap_or_default(),
        other => other.to_string(),
    }
}
