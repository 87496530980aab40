//! Parzen "Qmid" quantiles
//!
//! Interpolates between the mid-ranks of tie blocks instead of raw order
//! statistic indices. A block of equal values spanning indices `[i, j)`
//! sits at rank `(i + j) / 2`, so duplicates pull the interpolation
//! toward their value in proportion to their count.
//!
//! ```
//! use normgof_stats::parzen_quantiles;
//! let q = parzen_quantiles(&[1.0, 1.0, 2.0, 4.0], &[0.0, 0.5, 1.0]).unwrap();
//! assert_eq!(q[0], 1.0);
//! assert!((q[1] - 5.0 / 3.0).abs() < 1e-12);
//! assert_eq!(q[2], 4.0);
//! ```

use crate::error::{validation, GofResult};

/// A maximal run of equal values `[start, end)`
#[derive(Debug, Clone, Copy)]
struct TieBlock {
    start: usize,
    end: usize,
    value: f64,
}

impl TieBlock {
    /// Block of equal values containing index `i`
    fn around(sorted: &[f64], i: usize) -> Self {
        let value = sorted[i];
        let mut start = i;
        while start > 0 && sorted[start - 1] == value {
            start -= 1;
        }
        let mut end = i + 1;
        while end < sorted.len() && sorted[end] == value {
            end += 1;
        }
        Self { start, end, value }
    }

    fn mid_rank(&self) -> f64 {
        (self.start + self.end) as f64 / 2.0
    }
}

/// Interpolated quantile of a sorted sample at probability `q`
///
/// Returns 0 for an empty sample. `q` must lie in [0, 1] and the sample
/// must be finite.
pub fn parzen_quantile(sorted: &[f64], q: f64) -> GofResult<f64> {
    validation::validate_probability(q)?;
    validation::validate_finite(sorted, "parzen_quantile")?;
    let n = sorted.len();
    if n == 0 {
        return Ok(0.0);
    }

    let qn = q * n as f64;
    if qn <= 0.5 {
        return Ok(sorted[0]);
    }
    if qn >= n as f64 - 0.5 {
        return Ok(sorted[n - 1]);
    }

    let located = TieBlock::around(sorted, (qn as usize).min(n - 1));
    let (low, high) = if located.mid_rank() <= qn {
        if located.end == n {
            return Ok(located.value);
        }
        (located, TieBlock::around(sorted, located.end))
    } else {
        if located.start == 0 {
            return Ok(located.value);
        }
        (TieBlock::around(sorted, located.start - 1), located)
    };

    let (c_low, c_high) = (low.mid_rank(), high.mid_rank());
    let r = (qn - c_low) / (c_high - c_low);
    Ok((1.0 - r) * low.value + r * high.value)
}

/// Quantiles at several probabilities
pub fn parzen_quantiles(sorted: &[f64], qs: &[f64]) -> GofResult<Vec<f64>> {
    qs.iter().map(|&q| parzen_quantile(sorted, q)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_example() {
        let data = [1.0, 1.0, 2.0, 4.0];
        assert_eq!(parzen_quantile(&data, 0.0).unwrap(), 1.0);
        let mid = parzen_quantile(&data, 0.5).unwrap();
        assert!((mid - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(parzen_quantile(&data, 1.0).unwrap(), 4.0);
    }

    #[test]
    fn test_distinct_values_interpolate_midpoints() {
        // Without ties, value i sits at rank i + 0.5
        let data = [10.0, 20.0, 30.0, 40.0];
        let q = parzen_quantile(&data, 0.5).unwrap();
        assert!((q - 25.0).abs() < 1e-12);
        let q = parzen_quantile(&data, 0.375).unwrap();
        assert!((q - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_sample_rejected() {
        for bad in [f64::NAN, f64::INFINITY] {
            let err = parzen_quantile(&[1.0, 2.0, bad], 0.5).unwrap_err();
            assert!(matches!(err, crate::error::GofError::Domain { .. }));
        }
        assert!(parzen_quantiles(&[f64::NEG_INFINITY, 0.0], &[0.0]).is_err());
    }

    #[test]
    fn test_empty_sample_is_zero() {
        assert_eq!(parzen_quantile(&[], 0.3).unwrap(), 0.0);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(parzen_quantile(&[7.0], 0.5).unwrap(), 7.0);
    }

    #[test]
    fn test_trailing_tie_block() {
        let data = [1.0, 2.0, 2.0, 2.0];
        // qn = 3.2 lands in the last block past its mid-rank
        assert_eq!(parzen_quantile(&data, 0.8).unwrap(), 2.0);
    }

    #[test]
    fn test_leading_tie_block() {
        let data = [1.0, 1.0, 1.0, 2.0];
        // qn = 0.9 lands in the first block before its mid-rank
        assert_eq!(parzen_quantile(&data, 0.225).unwrap(), 1.0);
    }

    #[test]
    fn test_backward_scan() {
        let data = [1.0, 2.0, 2.0, 2.0, 5.0];
        // qn = 1.5; block of 2s spans [1, 4) with mid-rank 2.5 > 1.5,
        // so interpolate from the 1 at rank 0.5
        let q = parzen_quantile(&data, 0.3).unwrap();
        assert!((q - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_probability() {
        assert!(parzen_quantile(&[1.0, 2.0], 1.5).is_err());
        assert!(parzen_quantile(&[1.0, 2.0], f64::NAN).is_err());
    }

    #[test]
    fn test_vectorized() {
        let data = [1.0, 1.0, 2.0, 4.0];
        let qs = parzen_quantiles(&data, &[0.0, 1.0]).unwrap();
        assert_eq!(qs, vec![1.0, 4.0]);
    }
}
