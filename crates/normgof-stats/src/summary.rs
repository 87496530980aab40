//! Location-scale parameters for the Gaussian null hypothesis
//!
//! A `LocationScale` is a (mean, variance) pair. It is either supplied by
//! the caller (known parameters) or estimated from the very sample under
//! test, using the unbiased sample variance. Which of the two applies is
//! what the `ESTIMATES` modification corrects for.

use serde::{Deserialize, Serialize};

use crate::error::{validation, GofError, GofResult};

/// Gaussian location-scale parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationScale {
    /// Mean (location)
    pub mean: f64,
    /// Variance (scale squared)
    pub variance: f64,
}

impl LocationScale {
    /// Known parameters, validated
    pub fn new(mean: f64, variance: f64) -> GofResult<Self> {
        if !mean.is_finite() {
            return Err(GofError::domain(format!("mean must be finite, got {mean}")));
        }
        validation::validate_variance(variance)?;
        Ok(Self { mean, variance })
    }

    /// The standard normal, N(0, 1)
    pub fn standard() -> Self {
        Self {
            mean: 0.0,
            variance: 1.0,
        }
    }

    /// Estimate parameters from a sample (unbiased variance)
    pub fn estimate(data: &[f64]) -> GofResult<Self> {
        let (mean, variance) = mean_and_variance(data)?;
        validation::validate_variance(variance)?;
        Ok(Self { mean, variance })
    }

    /// Standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Compute the z-score of a value
    pub fn zscore(&self, x: f64) -> f64 {
        (x - self.mean) / self.std_dev()
    }
}

impl Default for LocationScale {
    fn default() -> Self {
        Self::standard()
    }
}

/// Sample mean and unbiased (n - 1) variance
///
/// Uses Welford's update so large offsets do not cancel catastrophically.
/// Requires at least two finite values.
pub fn mean_and_variance(data: &[f64]) -> GofResult<(f64, f64)> {
    validation::validate_non_empty(data, "mean_and_variance")?;
    validation::validate_finite(data, "mean_and_variance")?;
    if data.len() < 2 {
        return Err(GofError::domain(
            "variance of a single value is undefined",
        ));
    }

    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, &x) in data.iter().enumerate() {
        let delta = x - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (x - mean);
    }

    Ok((mean, m2 / (data.len() - 1) as f64))
}
