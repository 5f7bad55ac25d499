//! Evaluation metrics
//!
//! Closed-form regression metrics over paired slices. All of them reject
//! shape mismatches and empty inputs rather than producing NaN.

use crate::{Error, Result};

fn check_shapes(y_true: &[f64], y_pred: &[f64]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(Error::InvalidInput(format!(
            "y_true and y_pred must have the same length, got {} and {}",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Err(Error::InvalidInput(
            "metrics require at least one sample".to_string(),
        ));
    }
    Ok(())
}

/// Mean squared error.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] on empty or length-mismatched inputs.
pub fn mse(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_shapes(y_true, y_pred)?;
    let sum: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    Ok(sum / y_true.len() as f64)
}

/// Root mean squared error.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] on empty or length-mismatched inputs.
pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    Ok(mse(y_true, y_pred)?.sqrt())
}

/// Mean absolute error.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] on empty or length-mismatched inputs.
pub fn mae(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_shapes(y_true, y_pred)?;
    let sum: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).abs())
        .sum();
    Ok(sum / y_true.len() as f64)
}

/// R-squared (coefficient of determination). Best possible score is 1.0.
///
/// A constant `y_true` has zero total variance; the score is then 1.0 for a
/// perfect prediction and 0.0 otherwise.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] on empty or length-mismatched inputs.
pub fn r2(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_shapes(y_true, y_pred)?;
    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - ss_res / ss_tot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse_perfect() {
        let y = [1.0, 2.0, 3.0];
        assert!((mse(&y, &y).unwrap()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mse_known_value() {
        let value = mse(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]).unwrap();
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rmse_known_value() {
        let value = rmse(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
        let expected = (12.5f64).sqrt();
        assert!((value - expected).abs() < 1e-12);
    }

    #[test]
    fn test_mae_known_value() {
        let value = mae(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]).unwrap();
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_r2_perfect() {
        let y = [1.0, 2.0, 3.0];
        assert!((r2(&y, &y).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_r2_mean_prediction_is_zero() {
        let y_true = [1.0, 2.0, 3.0];
        let y_pred = [2.0, 2.0, 2.0];
        assert!(r2(&y_true, &y_pred).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_r2_constant_target() {
        let y = [5.0, 5.0, 5.0];
        assert!((r2(&y, &y).unwrap() - 1.0).abs() < f64::EPSILON);
        assert!(r2(&y, &[4.0, 5.0, 6.0]).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        assert!(mse(&[1.0], &[1.0, 2.0]).is_err());
        assert!(mae(&[1.0], &[]).is_err());
        assert!(r2(&[], &[]).is_err());
    }
}
