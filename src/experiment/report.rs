//! Per-run report artifacts
//!
//! The flat files written into each run directory: the results payload
//! (`metrics.json`), the raw parameter dump (`params.json`), a free-form
//! markdown report, and the report-request pair consumed by the daily-report
//! tool. The field set of `report_request.json` is a stable contract for
//! downstream tooling; do not rename fields without versioning.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{ExperimentRecord, OutputLayout};
use crate::Result;

/// Hand-off record telling the reporting tool where a run's artifacts live.
///
/// Serialized as `report_request.json`. Field names and presence are frozen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRequest {
    /// Run timestamp (`YYYY-MM-DD_HHMMSS`).
    pub timestamp: String,
    /// Experiment name.
    pub experiment_name: String,
    /// Run output directory.
    pub output_dir: String,
    /// Path of the run's markdown report.
    pub report_path: String,
    /// Path of the run's `params.json`.
    pub params_path: String,
    /// Path of the run's `metrics.json`.
    pub metrics_path: String,
    /// Path of the config file that produced the run, if any.
    pub config_path: Option<String>,
    /// Scalar-filtered metrics mapping (empty when the run recorded none).
    pub metrics: Map<String, Value>,
}

/// Save the run's results payload as `metrics.json`.
///
/// The payload shape is `{"config": ..., "metrics": ..., "model_params": ...}`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_results(record: &ExperimentRecord, layout: &OutputLayout) -> Result<()> {
    let payload = json!({
        "config": record.config(),
        "metrics": record.metrics(),
        "model_params": record.model_params(),
    });
    write_pretty_json(&layout.metrics_path(), &payload)
}

/// Save an arbitrary parameter mapping as `params.json`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_params(params: &Map<String, Value>, layout: &OutputLayout) -> Result<()> {
    write_pretty_json(&layout.params_path(), &Value::Object(params.clone()))
}

/// Write the free-form markdown report (`report.md`).
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_report(lines: &[String], layout: &OutputLayout) -> Result<()> {
    fs::write(layout.report_path(), format!("{}\n", lines.join("\n")))?;
    Ok(())
}

/// Write the report-request pair for the daily-report tool.
///
/// Produces `report_request.json` (the machine contract) and
/// `report_request.md` (a human-readable mirror ending with the follow-up
/// command). Returns the path of the JSON request.
///
/// # Errors
///
/// Returns an error if either file cannot be written.
pub fn write_report_request(
    layout: &OutputLayout,
    config_path: Option<&Path>,
    metrics: Map<String, Value>,
) -> Result<PathBuf> {
    let request = ReportRequest {
        timestamp: layout.timestamp().to_string(),
        experiment_name: layout.experiment_name().to_string(),
        output_dir: layout.dir().display().to_string(),
        report_path: layout.report_path().display().to_string(),
        params_path: layout.params_path().display().to_string(),
        metrics_path: layout.metrics_path().display().to_string(),
        config_path: config_path.map(|p| p.display().to_string()),
        metrics,
    };
    let request_path = layout.request_path();
    write_pretty_json(&request_path, &serde_json::to_value(&request)?)?;

    let mirror = [
        "# Daily Report Request".to_string(),
        String::new(),
        format!("- Timestamp: {}", request.timestamp),
        format!("- Experiment: {}", request.experiment_name),
        format!("- Output: {}", request.output_dir),
        format!("- Report: {}", request.report_path),
        format!("- Params: {}", request.params_path),
        format!("- Metrics: {}", request.metrics_path),
        format!(
            "- Config: {}",
            request.config_path.as_deref().unwrap_or("n/a")
        ),
        String::new(),
        "Next step:".to_string(),
        format!(
            "- Run: ensayo daily-report --request {}",
            request_path.display()
        ),
    ];
    fs::write(
        layout.request_summary_path(),
        format!("{}\n", mirror.join("\n")),
    )?;

    Ok(request_path)
}

fn write_pretty_json(path: &Path, value: &Value) -> Result<()> {
    fs::write(path, format!("{}\n", serde_json::to_string_pretty(value)?))?;
    Ok(())
}
