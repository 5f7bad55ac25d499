//! Models
//!
//! The "models" here are deliberately trivial: a two-parameter closed-form
//! linear fit and a placeholder computation. The template is about recording
//! runs, not training.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Simple linear regression model fitted by ordinary least squares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Estimated slope.
    pub slope: f64,
    /// Estimated intercept.
    pub intercept: f64,
}

impl LinearModel {
    /// Fit a linear model via the analytic least-squares solution.
    ///
    /// When `x` has zero variance the normal equations are degenerate; the
    /// fit degrades to slope `0.0` and intercept `mean(y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the inputs are empty or their
    /// lengths differ.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.is_empty() || y.is_empty() {
            return Err(Error::InvalidInput(
                "input arrays must not be empty".to_string(),
            ));
        }
        if x.len() != y.len() {
            return Err(Error::InvalidInput(format!(
                "x and y must have the same length, got {} and {}",
                x.len(),
                y.len()
            )));
        }

        let n = x.len() as f64;
        let x_mean = x.iter().sum::<f64>() / n;
        let y_mean = y.iter().sum::<f64>() / n;

        let mut covariance = 0.0;
        let mut variance = 0.0;
        for (&xi, &yi) in x.iter().zip(y) {
            covariance += (xi - x_mean) * (yi - y_mean);
            variance += (xi - x_mean).powi(2);
        }

        if variance == 0.0 {
            return Ok(Self {
                slope: 0.0,
                intercept: y_mean,
            });
        }

        let slope = covariance / variance;
        Ok(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    /// Predict target values for the given inputs.
    #[must_use]
    pub fn predict(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&xi| self.slope * xi + self.intercept).collect()
    }

    /// Export the fitted parameters as a JSON map for the experiment record.
    #[must_use]
    pub fn params(&self) -> serde_json::Map<String, Value> {
        let mut map = serde_json::Map::new();
        map.insert("estimated_slope".to_string(), Value::from(self.slope));
        map.insert("estimated_intercept".to_string(), Value::from(self.intercept));
        map
    }
}

/// Placeholder research model demonstrating the experiment structure.
#[derive(Debug, Clone, Copy)]
pub struct ResearchModel {
    /// Learning rate parameter.
    pub learning_rate: f64,
}

impl ResearchModel {
    /// Create a model with the given learning rate.
    #[must_use]
    pub const fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    /// Run a simple computation: sum of the data scaled by the learning rate.
    #[must_use]
    pub fn run_computation(&self, data: &[f64]) -> f64 {
        data.iter().sum::<f64>() * self.learning_rate
    }
}
