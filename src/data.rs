//! Synthetic data generation
//!
//! Deterministic given a seed: the same seed always reproduces the same
//! `(x, y)` pair, which is what makes recorded runs comparable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

use crate::{Error, Result};

/// Generate sample linear data with Gaussian noise.
///
/// Produces `n_samples` points with `x` evenly spaced over `[0, 10]` and
/// `y = slope * x + intercept + N(0, noise_std)`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `n_samples` is zero or `noise_std`
/// is negative or non-finite.
pub fn generate_linear_data(
    n_samples: usize,
    slope: f64,
    intercept: f64,
    noise_std: f64,
    seed: Option<u64>,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if n_samples < 1 {
        return Err(Error::InvalidInput(format!(
            "n_samples must be at least 1, got {n_samples}"
        )));
    }
    let noise = Normal::new(0.0, noise_std).map_err(|e| {
        Error::InvalidInput(format!("invalid noise_std {noise_std}: {e}"))
    })?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let x = linspace(0.0, 10.0, n_samples);
    let y = x
        .iter()
        .map(|&xi| slope * xi + intercept + rng.sample(noise))
        .collect();
    Ok((x, y))
}

/// `n` evenly spaced points over `[start, end]`, endpoints included.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}
