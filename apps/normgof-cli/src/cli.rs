//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use normgof_stats::{Emit, EdfTest, GofConfig, GofError, LocationScale, Modifications};

#[derive(Parser, Debug)]
#[command(
    name = "normgof",
    version,
    about = "Test whether a sample plausibly came from a Gaussian",
    long_about = "Test whether a sample plausibly came from a Gaussian using EDF \
                  statistics with Monte Carlo p-values. The exit status of `test` \
                  is the number of tests that rejected at the significance level."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run goodness-of-fit tests on a sample
    Test(TestArgs),
    /// Parzen mid-rank quantiles of a sample
    Quantile(QuantileArgs),
}

#[derive(Args, Debug)]
pub struct TestArgs {
    /// Sample values; read from stdin when omitted
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<f64>,

    /// Test to run: D, V, W2, U2, A2 or all (repeatable)
    #[arg(short, long = "test", value_name = "TEST")]
    pub tests: Vec<String>,

    /// Apply the finite-sample correction
    #[arg(long)]
    pub finite_n: bool,

    /// Apply the estimated-parameter correction
    #[arg(long)]
    pub estimates: bool,

    /// Known mean (requires --variance)
    #[arg(long, requires = "variance", allow_negative_numbers = true)]
    pub mean: Option<f64>,

    /// Known variance (requires --mean)
    #[arg(long, requires = "mean")]
    pub variance: Option<f64>,

    /// Monte Carlo repetitions per null distribution
    #[arg(short = 'm', long)]
    pub repetitions: Option<usize>,

    /// Significance level
    #[arg(short, long)]
    pub alpha: Option<f64>,

    /// Seed for reproducible null distributions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulate repetitions on all cores
    #[arg(long)]
    pub parallel: bool,

    /// What to print: zscores, pit, stat, cdf, pvalue, all (repeatable)
    #[arg(short, long = "emit", value_name = "ITEM")]
    pub emit: Vec<Emit>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// TOML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct QuantileArgs {
    /// Sample values; read from stdin when omitted
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<f64>,

    /// Probability level in [0, 1] (repeatable)
    #[arg(short, long = "prob", value_name = "P", default_values_t = [0.0, 0.5, 1.0])]
    pub probs: Vec<f64>,
}

impl TestArgs {
    /// Overlay command-line flags on a base configuration
    pub fn apply(&self, mut config: GofConfig) -> Result<GofConfig, GofError> {
        if !self.tests.is_empty() {
            let mut tests = Vec::new();
            for name in &self.tests {
                if name.eq_ignore_ascii_case("all") {
                    tests.extend(EdfTest::ALL);
                } else {
                    tests.push(name.parse::<EdfTest>()?);
                }
            }
            config.tests = tests;
        }
        if self.finite_n {
            config.modifications |= Modifications::FINITE_N;
        }
        if self.estimates {
            config.modifications |= Modifications::ESTIMATES;
        }
        if let (Some(mean), Some(variance)) = (self.mean, self.variance) {
            config.params = Some(LocationScale::new(mean, variance)?);
        }
        if let Some(repetitions) = self.repetitions {
            config.monte_carlo.repetitions = repetitions;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if self.seed.is_some() {
            config.monte_carlo.seed = self.seed;
        }
        if self.parallel {
            config.monte_carlo.parallel = true;
        }
        if !self.emit.is_empty() {
            config.emit = self.emit.iter().fold(Emit::empty(), |acc, &e| acc | e);
        }

        config.validate()?;
        Ok(config)
    }
}
