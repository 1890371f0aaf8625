//! Reads a CSV export of the claims table into a [`Dataset`].

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use claimsift::{Column, Dataset, Row, RowId};
use tracing::debug;

use crate::config::SiftConfig;

/// Header that, when present, supplies row ids.
pub const ID_COLUMN: &str = "id";

/// Loads the CSV at `path`.
pub fn read_dataset(path: &Path, config: &SiftConfig) -> Result<Dataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open data file {}", path.display()))?;
    parse_dataset(file, config).with_context(|| format!("failed to read {}", path.display()))
}

/// Builds a dataset from CSV text.
///
/// Column kinds come from the config, falling back to the header name. Row
/// ids come from the `id` column when there is one, otherwise from the
/// 1-based data line. Short records are allowed; their missing cells read as
/// empty.
pub fn parse_dataset<R: Read>(input: R, config: &SiftConfig) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("missing header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let id_at = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(ID_COLUMN));
    let columns: Vec<Column> = headers
        .iter()
        .map(|name| Column::new(name.as_str(), config.kind_of(name)))
        .collect();

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for (index, record) in reader.records().enumerate() {
        let line = index + 1;
        let record = record.with_context(|| format!("bad record on data line {line}"))?;

        let id = match id_at.and_then(|at| record.get(at)).map(str::trim) {
            Some(id) if !id.is_empty() => RowId::new(id),
            _ => RowId::from(line),
        };
        if !seen.insert(id.clone()) {
            bail!("duplicate row id '{id}' on data line {line}");
        }

        let mut row = Row::new(id);
        for (name, cell) in headers.iter().zip(record.iter()) {
            row.set_cell(name.as_str(), cell);
        }
        rows.push(row);
    }

    debug!(columns = columns.len(), rows = rows.len(), "loaded dataset");
    Ok(Dataset::new(columns, rows)?)
}
