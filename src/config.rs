//! Experiment configuration
//!
//! Configs are YAML mappings. The fields below are what the bundled linear
//! experiment needs; any additional keys are retained verbatim and flow into
//! `params.json` and the `param_*` ledger columns unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

fn default_experiment_name() -> String {
    "linear".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

/// Configuration for a linear-regression experiment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Experiment name, used as a path segment under the output root.
    #[serde(default = "default_experiment_name")]
    pub experiment_name: String,

    /// Number of synthetic samples to generate.
    pub n_samples: usize,

    /// True slope of the generating line.
    pub slope: f64,

    /// True intercept of the generating line.
    pub intercept: f64,

    /// Standard deviation of the Gaussian noise added to targets.
    pub noise_std: f64,

    /// RNG seed. Unset means a fresh entropy seed per run.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Root directory for all experiment outputs.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Extra user-defined parameters, preserved for the record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ExperimentConfig {
    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the path if the file is missing or
    /// the YAML does not match the expected shape.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_yaml::from_str(&text)
            .map_err(|e| Error::Config(format!("invalid config {}: {e}", path.display())))
    }

    /// Project the full configuration (extra keys included) into a JSON map.
    ///
    /// This is the mapping recorded in `params.json` and flattened into the
    /// cumulative ledger.
    #[must_use]
    pub fn as_params(&self) -> serde_json::Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}
