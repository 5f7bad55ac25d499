//! Summary Ledger - cumulative table of all experiment runs
//!
//! One flattened row per run is appended to `experiments.csv` under the
//! output root. The column set is the union of every column ever seen, so a
//! run that introduces new parameters or metrics widens the schema without
//! losing historical rows. Columns are kept sorted to make successive
//! rewrites diffable.
//!
//! The design assumes a single sequential writer per ledger file. The
//! read-merge-rewrite cycle takes no lock; two simultaneous runs against the
//! same output root can lose one of the two rows.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{is_scalar, ExperimentRecord, OutputLayout};
use crate::{Error, Result};

/// File name of the cumulative ledger within the output root.
pub const LEDGER_FILE: &str = "experiments.csv";

/// Parsed view of the cumulative ledger.
///
/// Rows are keyed by column name, so the on-disk column order is irrelevant
/// once read; only the header naming matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerTable {
    columns: Vec<String>,
    rows: Vec<BTreeMap<String, String>>,
}

impl LedgerTable {
    /// Get the header columns in on-disk order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the data rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[BTreeMap<String, String>] {
        &self.rows
    }

    /// Check whether the ledger holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cumulative experiment ledger backed by a single CSV file.
#[derive(Debug, Clone)]
pub struct SummaryLedger {
    path: PathBuf,
}

impl SummaryLedger {
    /// Ledger for the given output root (`<output_root>/experiments.csv`).
    #[must_use]
    pub fn new(output_root: impl AsRef<Path>) -> Self {
        Self {
            path: output_root.as_ref().join(LEDGER_FILE),
        }
    }

    /// Get the ledger file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one flattened row for `record`, rewriting the file with the
    /// sorted union of the existing columns and this row's columns. Cells a
    /// row has no value for are written empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ledger`] if an existing ledger cannot be parsed
    /// (corrupt history is surfaced, never skipped) and [`Error::Csv`] /
    /// [`Error::Io`] if the rewrite fails.
    pub fn append(&self, record: &ExperimentRecord, layout: &OutputLayout) -> Result<()> {
        let row = flatten(record, layout);
        let existing = self.read()?;

        let mut columns: BTreeSet<String> = existing.columns.iter().cloned().collect();
        columns.extend(row.keys().cloned());

        let mut rows = existing.rows;
        rows.push(row);

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(&columns)?;
        for row in &rows {
            writer.write_record(
                columns
                    .iter()
                    .map(|column| row.get(column).map_or("", String::as_str)),
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read the ledger back. A missing file reads as an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ledger`] naming the file if it exists but cannot be
    /// parsed as tabular data (including ragged rows).
    pub fn read(&self) -> Result<LedgerTable> {
        if !self.path.exists() {
            return Ok(LedgerTable::default());
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| Error::Ledger(format!("failed to open {}: {e}", self.path.display())))?;
        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| Error::Ledger(format!("failed to parse {}: {e}", self.path.display())))?
            .iter()
            .map(ToString::to_string)
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| {
                Error::Ledger(format!("failed to parse {}: {e}", self.path.display()))
            })?;
            let row: BTreeMap<String, String> = columns
                .iter()
                .zip(record.iter())
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(column, cell)| (column.clone(), cell.to_string()))
                .collect();
            rows.push(row);
        }

        Ok(LedgerTable { columns, rows })
    }
}

/// Flatten a record into prefixed scalar columns plus `timestamp` and `path`.
///
/// Row identity (`timestamp`) is the output directory's leaf segment. Each
/// scalar entry of `config`, `metrics`, and `model_params` becomes a
/// `param_*`, `metric_*`, or `model_*` column; non-scalar values are dropped.
#[must_use]
pub fn flatten(record: &ExperimentRecord, layout: &OutputLayout) -> BTreeMap<String, String> {
    let mut row = BTreeMap::new();
    row.insert("timestamp".to_string(), layout.timestamp().to_string());
    row.insert("path".to_string(), layout.dir().display().to_string());

    let sections = [
        ("param_", record.config()),
        ("metric_", record.metrics()),
        ("model_", record.model_params()),
    ];
    for (prefix, map) in sections {
        for (key, value) in map {
            if let Some(cell) = scalar_cell(value) {
                row.insert(format!("{prefix}{key}"), cell);
            }
        }
    }
    row
}

/// Render a scalar JSON value as a CSV cell. Non-scalars render as `None`.
fn scalar_cell(value: &Value) -> Option<String> {
    if !is_scalar(value) {
        return None;
    }
    Some(match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
