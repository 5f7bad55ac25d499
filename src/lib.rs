//! # Ensayo: Reproducible Research Experiment Template
//!
//! Ensayo is a template for small reproducible research experiments: it
//! generates seeded synthetic data, fits a trivial closed-form model,
//! records metrics, and writes human- and agent-readable reports into a
//! timestamped output directory. Every run also appends one flattened row
//! to a cumulative ledger whose column schema grows monotonically as new
//! parameters and metrics appear.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ensayo::experiment::{ExperimentRecord, OutputLayout, SummaryLedger};
//!
//! let layout = OutputLayout::prepare("demo", "outputs", None)?;
//! let record = ExperimentRecord::builder("demo")
//!     .metrics(serde_json::json!({"mse": 0.02}).as_object().unwrap().clone())
//!     .build();
//!
//! ensayo::experiment::save_results(&record, &layout)?;
//! SummaryLedger::new(layout.root()).append(&record, &layout)?;
//! # Ok::<(), ensayo::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod daily;
pub mod data;
pub mod error;
pub mod experiment;
pub mod logging;
pub mod metrics;
pub mod model;

pub use error::{Error, Result};
