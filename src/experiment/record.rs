//! Experiment Record - the unit of persisted knowledge about one run

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// True for the value kinds that survive flattening into the ledger.
///
/// Numbers, strings, and booleans are scalars; arrays, objects, and null
/// are not and are silently dropped wherever a record is flattened.
#[must_use]
pub fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Number(_) | Value::String(_) | Value::Bool(_))
}

/// Result record for a single experiment run.
///
/// Holds the three open mappings recorded per run: the configuration that
/// produced it, the evaluation metrics, and the fitted model parameters.
/// Values are arbitrary JSON; only scalar entries reach the cumulative
/// ledger (see [`is_scalar`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExperimentRecord {
    #[serde(skip)]
    experiment_name: String,
    config: Map<String, Value>,
    metrics: Map<String, Value>,
    model_params: Map<String, Value>,
}

impl ExperimentRecord {
    /// Create an empty record for the named experiment.
    #[must_use]
    pub fn new(experiment_name: impl Into<String>) -> Self {
        Self {
            experiment_name: experiment_name.into(),
            ..Self::default()
        }
    }

    /// Create a builder for constructing a record with its mappings.
    #[must_use]
    pub fn builder(experiment_name: impl Into<String>) -> ExperimentRecordBuilder {
        ExperimentRecordBuilder::new(experiment_name)
    }

    /// Get the experiment name.
    #[must_use]
    pub fn experiment_name(&self) -> &str {
        &self.experiment_name
    }

    /// Get the configuration mapping.
    #[must_use]
    pub const fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    /// Get the metrics mapping.
    #[must_use]
    pub const fn metrics(&self) -> &Map<String, Value> {
        &self.metrics
    }

    /// Get the model parameter mapping.
    #[must_use]
    pub const fn model_params(&self) -> &Map<String, Value> {
        &self.model_params
    }

    /// Metrics restricted to scalar values, for the report request hand-off.
    #[must_use]
    pub fn scalar_metrics(&self) -> Map<String, Value> {
        self.metrics
            .iter()
            .filter(|(_, v)| is_scalar(v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Builder for [`ExperimentRecord`].
#[derive(Debug)]
pub struct ExperimentRecordBuilder {
    experiment_name: String,
    config: Map<String, Value>,
    metrics: Map<String, Value>,
    model_params: Map<String, Value>,
}

impl ExperimentRecordBuilder {
    /// Create a new builder for the named experiment.
    #[must_use]
    pub fn new(experiment_name: impl Into<String>) -> Self {
        Self {
            experiment_name: experiment_name.into(),
            config: Map::new(),
            metrics: Map::new(),
            model_params: Map::new(),
        }
    }

    /// Set the configuration mapping.
    #[must_use]
    pub fn config(mut self, config: Map<String, Value>) -> Self {
        self.config = config;
        self
    }

    /// Set the metrics mapping.
    #[must_use]
    pub fn metrics(mut self, metrics: Map<String, Value>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set the model parameter mapping.
    #[must_use]
    pub fn model_params(mut self, model_params: Map<String, Value>) -> Self {
        self.model_params = model_params;
        self
    }

    /// Build the [`ExperimentRecord`].
    #[must_use]
    pub fn build(self) -> ExperimentRecord {
        ExperimentRecord {
            experiment_name: self.experiment_name,
            config: self.config,
            metrics: self.metrics,
            model_params: self.model_params,
        }
    }
}
