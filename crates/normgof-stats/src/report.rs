//! Running configured tests against a sample
//!
//! Ties the pieces together: normalize the sample once, evaluate each
//! configured statistic on it, simulate the matching null distribution and
//! read off the p-value.
//!
//! A test that cannot be evaluated on the sample (Anderson-Darling with a
//! PIT value saturated at 0 or 1) is recorded as a [`TestFailure`] and
//! counted as a rejection. The other tests still run.

use serde::{Deserialize, Serialize};

use crate::config::GofConfig;
use crate::error::{validation, GofError, GofResult};
use crate::montecarlo::{fresh_seed, NullModel};
use crate::normalize::{probability_integral_transform, sort_ascending, zscore};
use crate::null_cdf::NullCdf;
use crate::statistic::{EdfTest, Modifications};
use crate::summary::LocationScale;

/// Result of one test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub test: EdfTest,
    pub modifications: Modifications,
    /// Observed statistic
    pub statistic: f64,
    /// Fraction of the null distribution at or below the statistic
    pub p_value: f64,
    /// Fraction of the null distribution above the statistic
    pub upper_tail: f64,
    /// Whether `upper_tail < alpha`
    pub rejected: bool,
    /// Simulated null distribution
    pub null_cdf: NullCdf,
}

/// A test that could not be evaluated on the sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestFailure {
    pub test: EdfTest,
    pub modifications: Modifications,
    pub message: String,
}

/// Results of all configured tests on one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GofReport {
    /// Sample size
    pub n: usize,
    /// Parameters used for standardization
    pub params: LocationScale,
    /// Whether `params` were estimated from the sample
    pub estimated: bool,
    /// Seed the null distributions were simulated with
    pub seed: u64,
    /// Significance level
    pub alpha: f64,
    /// Standardized values in input order
    pub z_scores: Vec<f64>,
    /// Sorted PIT values
    pub pit: Vec<f64>,
    pub outcomes: Vec<TestOutcome>,
    /// Tests that failed on this sample
    pub failures: Vec<TestFailure>,
}

impl GofReport {
    /// Number of tests that rejected the Gaussian hypothesis, failures included
    pub fn rejections(&self) -> usize {
        self.outcomes.iter().filter(|o| o.rejected).count() + self.failures.len()
    }
}

/// Evaluate every configured test on `sample`
pub fn run_tests(sample: &[f64], config: &GofConfig) -> GofResult<GofReport> {
    config.validate()?;
    validation::validate_non_empty(sample, "run_tests")?;
    validation::validate_finite(sample, "run_tests")?;

    let (params, estimated) = match config.params {
        Some(p) => (p, false),
        None => (LocationScale::estimate(sample)?, true),
    };

    let mut z_scores = sample.to_vec();
    zscore(&mut z_scores, &params)?;
    let mut pit = z_scores.clone();
    sort_ascending(&mut pit);
    probability_integral_transform(&mut pit);

    let seed = config.monte_carlo.seed.unwrap_or_else(fresh_seed);
    let n = sample.len();

    let mut outcomes = Vec::with_capacity(config.tests.len());
    let mut failures = Vec::new();
    for &test in &config.tests {
        let mut model = NullModel::new(n, test, config.modifications)
            .with_repetitions(config.monte_carlo.repetitions);
        if !estimated {
            model = model.with_known_params(params);
        }

        match evaluate(&pit, &model, seed, config) {
            Ok(outcome) => outcomes.push(outcome),
            Err(GofError::Domain { message }) => {
                tracing::warn!(%test, %message, "test failed, counting as rejection");
                failures.push(TestFailure {
                    test,
                    modifications: config.modifications,
                    message,
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(GofReport {
        n,
        params,
        estimated,
        seed,
        alpha: config.alpha,
        z_scores,
        pit,
        outcomes,
        failures,
    })
}

fn evaluate(
    pit: &[f64],
    model: &NullModel,
    seed: u64,
    config: &GofConfig,
) -> GofResult<TestOutcome> {
    let statistic = model.test.statistic(pit, model.modifications)?;
    let null_cdf = simulate(model, seed, config.monte_carlo.parallel)?;
    let p_value = null_cdf.p_value(statistic);
    let upper_tail = 1.0 - p_value;

    tracing::debug!(test = %model.test, statistic, p_value, "test evaluated");
    Ok(TestOutcome {
        test: model.test,
        modifications: model.modifications,
        statistic,
        p_value,
        upper_tail,
        rejected: upper_tail < config.alpha,
        null_cdf,
    })
}

#[cfg(feature = "parallel")]
fn simulate(model: &NullModel, seed: u64, parallel: bool) -> GofResult<NullCdf> {
    if parallel {
        model.simulate_par(seed)
    } else {
        model.simulate_seeded(seed)
    }
}

#[cfg(not(feature = "parallel"))]
fn simulate(model: &NullModel, seed: u64, parallel: bool) -> GofResult<NullCdf> {
    if parallel {
        tracing::warn!("built without the `parallel` feature, simulating sequentially");
    }
    model.simulate_seeded(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(repetitions: usize) -> GofConfig {
        let mut config = GofConfig::default();
        config.monte_carlo.repetitions = repetitions;
        config.monte_carlo.seed = Some(11);
        config
    }

    #[test]
    fn test_report_shape() {
        let sample = [4.9, 5.3, 5.1, 4.4, 5.8, 5.0, 4.7, 5.2, 5.5, 4.6];
        let report = run_tests(&sample, &config(100)).unwrap();

        assert_eq!(report.n, 10);
        assert!(report.estimated);
        assert_eq!(report.seed, 11);
        assert_eq!(report.z_scores.len(), 10);
        assert!(report.pit.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(report.outcomes.len(), 5);
        for outcome in &report.outcomes {
            assert_eq!(outcome.null_cdf.len(), 100);
            assert!((0.0..=1.0).contains(&outcome.p_value));
            assert!((outcome.p_value + outcome.upper_tail - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_gross_outlier_rejected() {
        let mut sample: Vec<f64> = (0..30).map(|i| (i % 5) as f64 * 0.01).collect();
        sample.push(1000.0);

        let report = run_tests(&sample, &config(500)).unwrap();
        assert!(report.rejections() >= 3);
    }

    #[test]
    fn test_known_params_not_estimated() {
        let mut config = config(50);
        config.params = Some(LocationScale::standard());
        config.tests = vec![EdfTest::Kuiper];

        let report = run_tests(&[-0.5, 0.1, 0.9, -1.3], &config).unwrap();
        assert!(!report.estimated);
        assert_eq!(report.z_scores, vec![-0.5, 0.1, 0.9, -1.3]);
    }

    #[test]
    fn test_known_params_use_known_null() {
        let mut config = config(200);
        config.params = Some(LocationScale::standard());
        config.tests = vec![EdfTest::KolmogorovSmirnov];
        let sample = [-1.2, -0.6, -0.3, 0.0, 0.2, 0.5, 0.9, 1.4];

        let report = run_tests(&sample, &config).unwrap();
        let expected = NullModel::new(8, EdfTest::KolmogorovSmirnov, Modifications::empty())
            .with_repetitions(200)
            .with_known_params(LocationScale::standard())
            .simulate_seeded(11)
            .unwrap();
        assert_eq!(report.outcomes[0].null_cdf, expected);
    }

    #[test]
    fn test_saturated_outlier_keeps_other_tests() {
        let mut sample: Vec<f64> = (0..99).map(|i| (i % 10) as f64 * 0.001).collect();
        sample.push(1000.0);

        let report = run_tests(&sample, &config(200)).unwrap();
        assert_eq!(report.outcomes.len(), 4);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].test, EdfTest::AndersonDarling);
        assert!(report.outcomes.iter().all(|o| o.rejected));
        assert_eq!(report.rejections(), 5);
    }

    #[test]
    fn test_constant_sample_fails() {
        let err = run_tests(&[1.0; 8], &config(10)).unwrap_err();
        assert!(matches!(err, GofError::Domain { .. }));
    }

    #[test]
    fn test_invalid_config_fails() {
        let mut config = config(10);
        config.alpha = 0.0;
        let err = run_tests(&[1.0, 2.0, 3.0], &config).unwrap_err();
        assert!(matches!(err, GofError::Configuration { .. }));
    }
}
