//! Experiment output management and summary aggregation
//!
//! One run produces one [`ExperimentRecord`]; the [`OutputLayout`] supplies
//! its destination directory; the [`SummaryLedger`] flattens the record into
//! one prefixed row of the cumulative `experiments.csv`.
//!
//! ```text
//! <output_root>/<experiment_name>/<timestamp>/
//!   logs/  artifacts/
//!   metrics.json  params.json  report.md
//!   report_request.json  report_request.md
//! <output_root>/experiments.csv
//! <output_root>/<experiment_name>/latest -> newest run
//! <output_root>/latest                   -> newest run (any experiment)
//! ```

mod ledger;
mod output;
mod record;
mod report;

pub use ledger::{flatten, LedgerTable, SummaryLedger, LEDGER_FILE};
pub use output::{run_timestamp, update_latest_pointer, OutputLayout};
pub use record::{is_scalar, ExperimentRecord, ExperimentRecordBuilder};
pub use report::{
    save_params, save_results, write_report, write_report_request, ReportRequest,
};
