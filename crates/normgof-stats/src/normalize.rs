//! Sample-to-uniform normalization
//!
//! Converts a raw sample into sorted values in (0, 1) that are uniform
//! under the Gaussian null hypothesis:
//!
//! 1. z-score with a (mean, variance) pair
//! 2. sort ascending
//! 3. probability integral transform through Φ
//!
//! The steps are public so callers can print intermediate values.

use crate::error::{validation, GofResult};
use crate::gaussian::normal_cdf;
use crate::summary::LocationScale;

/// Standardize a sample in place
pub fn zscore(data: &mut [f64], params: &LocationScale) -> GofResult<()> {
    validation::validate_variance(params.variance)?;
    let sigma = params.std_dev();
    for x in data.iter_mut() {
        *x = (*x - params.mean) / sigma;
    }
    Ok(())
}

/// Sort ascending
///
/// Stable, so equal values stay adjacent in input order.
pub fn sort_ascending(data: &mut [f64]) {
    data.sort_by(f64::total_cmp);
}

/// Replace each z-score with Φ(z)
pub fn probability_integral_transform(data: &mut [f64]) {
    for x in data.iter_mut() {
        *x = normal_cdf(*x);
    }
}

/// Full pipeline in place: z-score, sort, PIT
pub fn u01ize(data: &mut [f64], params: &LocationScale) -> GofResult<()> {
    validation::validate_non_empty(data, "u01ize")?;
    validation::validate_finite(data, "u01ize")?;
    zscore(data, params)?;
    sort_ascending(data);
    probability_integral_transform(data);
    Ok(())
}

/// Full pipeline on a copy, leaving the input untouched
pub fn u01ized(data: &[f64], params: &LocationScale) -> GofResult<Vec<f64>> {
    let mut copy = data.to_vec();
    u01ize(&mut copy, params)?;
    Ok(copy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GofError;

    #[test]
    fn test_zscore() {
        let mut data = vec![1.0, 3.0, 5.0];
        zscore(&mut data, &LocationScale::new(3.0, 4.0).unwrap()).unwrap();
        assert_eq!(data, vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_zscore_rejects_zero_variance() {
        let mut data = vec![1.0, 2.0];
        let params = LocationScale {
            mean: 0.0,
            variance: 0.0,
        };
        let err = zscore(&mut data, &params).unwrap_err();
        assert!(matches!(err, GofError::Domain { .. }));
    }

    #[test]
    fn test_u01ize_sorted_open_interval() {
        let mut data = vec![0.3, -1.2, 2.5, 0.0, -0.4, 1.1];
        u01ize(&mut data, &LocationScale::standard()).unwrap();

        assert!(data.windows(2).all(|w| w[0] <= w[1]));
        assert!(data.iter().all(|&p| p > 0.0 && p < 1.0));
        assert!((data[2] - 0.5).abs() < 1e-12);
        assert!((data[0] - normal_cdf(-1.2)).abs() < 1e-15);
    }

    #[test]
    fn test_u01ized_preserves_input() {
        let data = vec![2.0, 1.0, 3.0];
        let ps = u01ized(&data, &LocationScale::new(2.0, 1.0).unwrap()).unwrap();

        assert_eq!(data, vec![2.0, 1.0, 3.0]);
        assert!((ps[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_u01ize_ties_adjacent() {
        let mut data = vec![1.0, 0.0, 1.0, -1.0];
        u01ize(&mut data, &LocationScale::standard()).unwrap();
        assert_eq!(data[2], data[3]);
    }

    #[test]
    fn test_u01ize_empty() {
        let mut data: Vec<f64> = Vec::new();
        assert!(u01ize(&mut data, &LocationScale::standard()).is_err());
    }
}
