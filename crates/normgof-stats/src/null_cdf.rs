//! Empirical null distribution of a statistic
//!
//! A `NullCdf` is the sorted list of simulated statistic values for one
//! (test, modifications, n) parameterisation. Evaluating it at an observed
//! statistic gives the p-value: the fraction of simulated values at or
//! below the observation.
//!
//! No interpolation is done between neighbouring entries, so the result
//! moves in steps of `1/m`.

use serde::{Deserialize, Serialize};

use crate::error::{validation, GofError, GofResult};
use crate::quantile::parzen_quantile;

/// Sorted Monte Carlo sample of a statistic under the null hypothesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullCdf {
    /// Sorted simulated values
    values: Vec<f64>,
}

impl NullCdf {
    /// Build from unsorted simulated values
    pub fn from_values(mut values: Vec<f64>) -> GofResult<Self> {
        validation::validate_non_empty(&values, "null CDF")?;
        if values.iter().any(|v| v.is_nan()) {
            return Err(GofError::domain("null CDF contains NaN"));
        }
        values.sort_by(f64::total_cmp);
        Ok(Self { values })
    }

    /// Fraction of simulated values <= `statistic`
    ///
    /// Time complexity: O(log m)
    pub fn p_value(&self, statistic: f64) -> f64 {
        p_value(&self.values, statistic)
    }

    /// Upper-tail probability, the fraction strictly above `statistic`
    pub fn upper_tail(&self, statistic: f64) -> f64 {
        1.0 - self.p_value(statistic)
    }

    /// Interpolated quantile of the null distribution
    pub fn quantile(&self, p: f64) -> GofResult<f64> {
        parzen_quantile(&self.values, p)
    }

    /// Number of simulated values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty (never true for a constructed CDF)
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sorted simulated values
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Fraction of a sorted null CDF at or below `statistic`
///
/// Returns 0 for an empty CDF.
pub fn p_value(null_cdf: &[f64], statistic: f64) -> f64 {
    if null_cdf.is_empty() {
        return 0.0;
    }
    let at_or_below = null_cdf.partition_point(|&v| v <= statistic);
    at_or_below as f64 / null_cdf.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p_value_basic() {
        let cdf = NullCdf::from_values(vec![0.5, 0.1, 0.4, 0.2, 0.3]).unwrap();

        assert_eq!(cdf.values(), &[0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(cdf.p_value(0.0), 0.0);
        assert_eq!(cdf.p_value(0.1), 0.2);
        assert_eq!(cdf.p_value(0.35), 0.6);
        assert_eq!(cdf.p_value(0.5), 1.0);
        assert_eq!(cdf.p_value(9.0), 1.0);
    }

    #[test]
    fn test_p_value_duplicates() {
        let cdf = [1.0, 2.0, 2.0, 2.0, 3.0, 4.0];
        assert!((p_value(&cdf, 2.0) - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_upper_tail() {
        let cdf = NullCdf::from_values(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(cdf.upper_tail(3.0), 0.25);
    }

    #[test]
    fn test_empty() {
        assert!(NullCdf::from_values(Vec::new()).is_err());
        assert_eq!(p_value(&[], 1.0), 0.0);
    }

    #[test]
    fn test_rejects_nan() {
        assert!(NullCdf::from_values(vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_quantile() {
        let cdf = NullCdf::from_values((1..=100).map(|x| x as f64).collect()).unwrap();
        assert_eq!(cdf.quantile(0.0).unwrap(), 1.0);
        assert!((cdf.quantile(0.5).unwrap() - 50.5).abs() < 1e-12);
        assert_eq!(cdf.quantile(1.0).unwrap(), 100.0);
    }
}
