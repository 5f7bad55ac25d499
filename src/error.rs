//! Error types for Ensayo
//!
//! Fatal conditions carry the path of the missing or invalid resource so a
//! failed run names exactly what to fix.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Ensayo error types
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file missing or unparseable
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid input to data generation, model fitting, or metrics
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Primary output directory could not be created (fatal to the run)
    #[error("Output error: {0}")]
    Output(String),

    /// Cumulative ledger exists but cannot be read back as tabular data
    #[error("Ledger error: {0}\nFix or move the existing ledger before re-running; it is never silently overwritten.")]
    Ledger(String),

    /// Report request missing or missing required fields
    #[error("Report request error: {0}")]
    Request(String),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
