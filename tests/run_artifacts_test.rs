//! Run Artifact Integration Tests
//!
//! Drives the whole per-run pipeline — data, fit, metrics, artifacts,
//! ledger, report request — against a temporary output root, then consumes
//! the request the way the daily-report tool does.

use serde_json::Value;

use ensayo::daily::{append_daily_log, load_request, render_entry, DailyEntry};
use ensayo::data::generate_linear_data;
use ensayo::experiment::{
    save_params, save_results, write_report, write_report_request, ExperimentRecord,
    OutputLayout, SummaryLedger,
};
use ensayo::metrics;
use ensayo::model::LinearModel;

fn full_run(root: &std::path::Path, timestamp: &str) -> (ExperimentRecord, OutputLayout) {
    let layout = OutputLayout::prepare("linear", root, Some(timestamp.to_string())).unwrap();

    let (x, y) = generate_linear_data(100, 2.0, 1.0, 0.1, Some(42)).unwrap();
    let model = LinearModel::fit(&x, &y).unwrap();
    let y_pred = model.predict(&x);

    let mut metric_map = serde_json::Map::new();
    metric_map.insert(
        "mse".to_string(),
        Value::from(metrics::mse(&y, &y_pred).unwrap()),
    );
    metric_map.insert(
        "r2".to_string(),
        Value::from(metrics::r2(&y, &y_pred).unwrap()),
    );

    let mut config_map = serde_json::Map::new();
    config_map.insert("n_samples".to_string(), Value::from(100));
    config_map.insert("noise_std".to_string(), Value::from(0.1));

    let record = ExperimentRecord::builder("linear")
        .config(config_map)
        .metrics(metric_map)
        .model_params(model.params())
        .build();

    save_results(&record, &layout).unwrap();
    save_params(record.config(), &layout).unwrap();
    write_report(
        &["# Experiment Report".to_string(), String::new(), "- Status: Success".to_string()],
        &layout,
    )
    .unwrap();
    write_report_request(&layout, None, record.scalar_metrics()).unwrap();
    SummaryLedger::new(layout.root()).append(&record, &layout).unwrap();

    (record, layout)
}

// =============================================================================
// Artifact Layout
// =============================================================================

#[test]
fn test_full_run_writes_every_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let (_, layout) = full_run(tmp.path(), "2026-08-06_120000");

    assert!(layout.logs_dir().is_dir());
    assert!(layout.artifacts_dir().is_dir());
    assert!(layout.metrics_path().is_file());
    assert!(layout.params_path().is_file());
    assert!(layout.report_path().is_file());
    assert!(layout.request_path().is_file());
    assert!(layout.request_summary_path().is_file());
    assert!(SummaryLedger::new(tmp.path()).path().is_file());
}

#[test]
fn test_fit_recovers_generating_line() {
    let tmp = tempfile::tempdir().unwrap();
    let (record, _) = full_run(tmp.path(), "2026-08-06_120000");

    let slope = record.model_params()["estimated_slope"].as_f64().unwrap();
    let intercept = record.model_params()["estimated_intercept"].as_f64().unwrap();
    assert!((slope - 2.0).abs() < 0.1);
    assert!((intercept - 1.0).abs() < 0.2);
    assert!(record.metrics()["r2"].as_f64().unwrap() > 0.99);
}

#[test]
fn test_metrics_json_holds_full_payload() {
    let tmp = tempfile::tempdir().unwrap();
    let (record, layout) = full_run(tmp.path(), "2026-08-06_120000");

    let payload: Value =
        serde_json::from_str(&std::fs::read_to_string(layout.metrics_path()).unwrap()).unwrap();
    assert_eq!(payload["config"]["n_samples"], Value::from(100));
    assert_eq!(
        payload["metrics"]["mse"],
        record.metrics()["mse"].clone()
    );
    assert!(payload["model_params"]["estimated_slope"].is_number());
}

// =============================================================================
// Report Request Hand-off
// =============================================================================

#[test]
fn test_report_request_round_trips_through_daily_tool() {
    let tmp = tempfile::tempdir().unwrap();
    let (_, layout) = full_run(tmp.path(), "2026-08-06_120000");

    let request = load_request(&layout.request_path()).unwrap();
    assert_eq!(request.timestamp, "2026-08-06_120000");
    assert_eq!(request.experiment_name, "linear");
    assert_eq!(request.metrics_path, layout.metrics_path().display().to_string());
    assert!(request.config_path.is_none());
    assert!(request.metrics.contains_key("mse"));

    let entry = DailyEntry {
        summary: "fit looks correct".to_string(),
        decision: "Pass".to_string(),
        ..DailyEntry::default()
    };
    let lines = render_entry(&request, &entry).unwrap();
    assert_eq!(lines[0], "## 2026-08-06 12:00:00 - linear");

    let docs = tmp.path().join("docs");
    let log_path = append_daily_log(&lines, &docs, "2026-08-06").unwrap();
    let text = std::fs::read_to_string(log_path).unwrap();
    assert!(text.starts_with("# 2026-08-06"));
    assert!(text.contains("- Summary: fit looks correct"));
    assert!(text.contains("- Decision: Pass"));
    assert!(text.contains("- Notes: TBD"));
}

// =============================================================================
// Ledger Coupling
// =============================================================================

#[test]
fn test_two_runs_share_one_ledger() {
    let tmp = tempfile::tempdir().unwrap();
    full_run(tmp.path(), "2026-08-06_120000");
    full_run(tmp.path(), "2026-08-06_130000");

    let table = SummaryLedger::new(tmp.path()).read().unwrap();
    assert_eq!(table.rows().len(), 2);
    assert_eq!(table.rows()[0]["timestamp"], "2026-08-06_120000");
    assert_eq!(table.rows()[1]["timestamp"], "2026-08-06_130000");
}

#[cfg(unix)]
#[test]
fn test_latest_pointer_reaches_newest_request() {
    let tmp = tempfile::tempdir().unwrap();
    full_run(tmp.path(), "2026-08-06_120000");
    let (_, second) = full_run(tmp.path(), "2026-08-06_130000");

    let via_latest = tmp.path().join("latest").join("report_request.json");
    let request = load_request(&via_latest).unwrap();
    assert_eq!(request.timestamp, second.timestamp());
}
