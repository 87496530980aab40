//! Error types for normgof-stats
//!
//! Two failure classes exist:
//! - Domain errors: degenerate numeric input (empty sample, non-positive
//!   variance, PIT values that break a logarithm)
//! - Configuration errors: nonsensical parameter combinations

use thiserror::Error;

/// Main error type for goodness-of-fit operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GofError {
    /// Degenerate numeric input
    #[error("Domain error: {message}")]
    Domain { message: String },

    /// Nonsensical parameter combination
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl GofError {
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Result type alias for goodness-of-fit operations
pub type GofResult<T> = Result<T, GofError>;

/// Validation utilities
///
/// Checks run at the entry of each public operation so invalid input fails
/// locally instead of surfacing later as NaN.
pub mod validation {
    use super::*;

    /// Validate that a sample has at least one value
    pub fn validate_non_empty(data: &[f64], what: &str) -> GofResult<()> {
        if data.is_empty() {
            return Err(GofError::domain(format!("{what}: empty sample")));
        }
        Ok(())
    }

    /// Validate that every value in a sample is finite
    pub fn validate_finite(data: &[f64], what: &str) -> GofResult<()> {
        if let Some(pos) = data.iter().position(|x| !x.is_finite()) {
            return Err(GofError::domain(format!(
                "{what}: non-finite value {} at index {pos}",
                data[pos]
            )));
        }
        Ok(())
    }

    /// Validate a variance is strictly positive and finite
    pub fn validate_variance(variance: f64) -> GofResult<()> {
        if !(variance.is_finite() && variance > 0.0) {
            return Err(GofError::domain(format!(
                "variance must be positive and finite, got {variance}"
            )));
        }
        Ok(())
    }

    /// Validate a probability lies in [0, 1]
    pub fn validate_probability(p: f64) -> GofResult<()> {
        if !(0.0..=1.0).contains(&p) {
            return Err(GofError::domain(format!(
                "probability must be in [0, 1], got {p}"
            )));
        }
        Ok(())
    }

    /// Validate a Monte Carlo repetition count
    pub fn validate_repetitions(repetitions: usize) -> GofResult<()> {
        if repetitions == 0 {
            return Err(GofError::configuration("repetitions must be positive"));
        }
        Ok(())
    }

    /// Validate a simulated sample size
    ///
    /// Simulated samples re-estimate their variance, which needs n >= 2.
    pub fn validate_sample_size(n: usize) -> GofResult<()> {
        if n < 2 {
            return Err(GofError::configuration(format!(
                "sample size must be at least 2, got {n}"
            )));
        }
        Ok(())
    }
}
