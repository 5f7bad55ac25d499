//! Daily research log
//!
//! The downstream side of the report-request hand-off: consume a
//! `report_request.json`, combine it with human-entered free text, and
//! append a dated markdown entry to the research log under
//! `docs/experiments/<date>.md`. The only dependency on the experiment core
//! is the request's field set.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::experiment::{is_scalar, ReportRequest};
use crate::{Error, Result};

/// Default location of the dated research logs.
pub const DEFAULT_DOCS_DIR: &str = "docs/experiments";

/// Human-entered fields of a daily log entry. Unanswered fields are `TBD`.
#[derive(Debug, Clone)]
pub struct DailyEntry {
    /// One-line summary of the run.
    pub summary: String,
    /// Pass / Fail / Continue.
    pub decision: String,
    /// Next action to take.
    pub next_action: String,
    /// Extra notes.
    pub notes: String,
}

impl Default for DailyEntry {
    fn default() -> Self {
        Self {
            summary: "TBD".to_string(),
            decision: "TBD".to_string(),
            next_action: "TBD".to_string(),
            notes: "TBD".to_string(),
        }
    }
}

/// Resolve the request file path from the tool's arguments.
///
/// Precedence: explicit `--request` path, then `--output-dir` joined with
/// the well-known file name, then the root-level `latest` pointer.
#[must_use]
pub fn resolve_request_path(request: Option<PathBuf>, output_dir: Option<PathBuf>) -> PathBuf {
    if let Some(path) = request {
        return path;
    }
    if let Some(dir) = output_dir {
        return dir.join("report_request.json");
    }
    PathBuf::from("outputs/latest/report_request.json")
}

/// Load and validate a report request.
///
/// # Errors
///
/// Returns [`Error::Request`] naming the path if the file is missing or is
/// not a valid request.
pub fn load_request(path: &Path) -> Result<ReportRequest> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::Request(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| Error::Request(format!("invalid request {}: {e}", path.display())))
}

/// Summarize scalar metrics as `key=value` pairs, or `n/a` when none.
///
/// A request whose metrics mapping nests the actual metrics under a
/// `"metrics"` key (the full results payload) is unwrapped first.
#[must_use]
pub fn summarize_metrics(metrics: &Map<String, Value>) -> String {
    let source = match metrics.get("metrics") {
        Some(Value::Object(inner)) => inner,
        _ => metrics,
    };
    let items: Vec<String> = source
        .iter()
        .filter(|(_, v)| is_scalar(v))
        .map(|(k, v)| match v {
            Value::String(s) => format!("{k}={s}"),
            other => format!("{k}={other}"),
        })
        .collect();
    if items.is_empty() {
        "n/a".to_string()
    } else {
        items.join(", ")
    }
}

/// Split a run timestamp into its date and a readable `HH:MM:SS` time.
///
/// # Errors
///
/// Returns [`Error::Request`] if the timestamp is not `YYYY-MM-DD_HHMMSS`.
pub fn split_timestamp(timestamp: &str) -> Result<(String, String)> {
    let (date, time) = timestamp.split_once('_').ok_or_else(|| {
        Error::Request(format!("invalid or missing timestamp: {timestamp:?}"))
    })?;
    let bytes = time.as_bytes();
    if bytes.len() < 6 || !bytes[..6].iter().all(u8::is_ascii_digit) {
        return Err(Error::Request(format!(
            "invalid or missing timestamp: {timestamp:?}"
        )));
    }
    let formatted = format!("{}:{}:{}", &time[0..2], &time[2..4], &time[4..6]);
    Ok((date.to_string(), formatted))
}

/// Render the markdown lines of a daily log entry.
///
/// # Errors
///
/// Returns [`Error::Request`] if the request's timestamp is malformed.
pub fn render_entry(request: &ReportRequest, entry: &DailyEntry) -> Result<Vec<String>> {
    let (date, time) = split_timestamp(&request.timestamp)?;

    let mut lines = vec![
        format!("## {date} {time} - {}", request.experiment_name),
        String::new(),
        format!("- Summary: {}", entry.summary),
        format!("- Decision: {}", entry.decision),
        format!("- Next Action: {}", entry.next_action),
        format!("- Notes: {}", entry.notes),
        format!("- Output: {}", request.output_dir),
        format!("- Report: {}", request.report_path),
        format!("- Params: {}", request.params_path),
        format!("- Metrics: {}", summarize_metrics(&request.metrics)),
    ];
    if let Some(config_path) = &request.config_path {
        lines.push(format!("- Config: {config_path}"));
    }
    Ok(lines)
}

/// Append an entry to the dated research log, creating the file with its
/// `# <date>` heading when absent. Returns the log file path.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be written.
pub fn append_daily_log(
    entry_lines: &[String],
    docs_dir: impl AsRef<Path>,
    log_date: &str,
) -> Result<PathBuf> {
    let docs_dir = docs_dir.as_ref();
    fs::create_dir_all(docs_dir)?;
    let log_path = docs_dir.join(format!("{log_date}.md"));

    if !log_path.exists() {
        fs::write(&log_path, format!("# {log_date}\n\n"))?;
    }

    let mut file = fs::OpenOptions::new().append(true).open(&log_path)?;
    writeln!(file, "{}\n", entry_lines.join("\n").trim_end())?;

    Ok(log_path)
}
