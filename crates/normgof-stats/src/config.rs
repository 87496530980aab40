//! Configuration for goodness-of-fit runs
//!
//! Centralized settings for which tests run, how their null distributions
//! are simulated, and what a report should emit.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::GofError;
use crate::montecarlo::DEFAULT_REPETITIONS;
use crate::statistic::{EdfTest, Modifications};
use crate::summary::LocationScale;

/// Default significance level
pub const DEFAULT_ALPHA: f64 = 0.05;

bitflags! {
    /// Which intermediate and final values a report shows
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Emit: u8 {
        /// Standardized sample values
        const ZSCORES = 0b00001;
        /// Sorted probability-integral-transform values
        const PIT = 0b00010;
        /// Observed statistic
        const STATISTIC = 0b00100;
        /// Simulated null CDF
        const CDF = 0b01000;
        /// P-value
        const PVALUE = 0b10000;
    }
}

impl Default for Emit {
    fn default() -> Self {
        Emit::STATISTIC | Emit::PVALUE
    }
}

impl std::str::FromStr for Emit {
    type Err = GofError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zscores" | "z" => Ok(Emit::ZSCORES),
            "pit" | "u01" => Ok(Emit::PIT),
            "stat" | "statistic" => Ok(Emit::STATISTIC),
            "cdf" => Ok(Emit::CDF),
            "pvalue" | "p" => Ok(Emit::PVALUE),
            "all" => Ok(Emit::all()),
            _ => Err(GofError::configuration(format!("unknown emit item '{s}'"))),
        }
    }
}

/// Goodness-of-fit run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GofConfig {
    /// Statistics to evaluate
    pub tests: Vec<EdfTest>,
    /// Corrections applied to every statistic
    pub modifications: Modifications,
    /// Known Gaussian parameters; estimated from the sample when absent
    pub params: Option<LocationScale>,
    /// Null distribution simulation settings
    pub monte_carlo: MonteCarloConfig,
    /// Significance level for rejection
    pub alpha: f64,
    /// Values to show in reports
    pub emit: Emit,
}

impl Default for GofConfig {
    fn default() -> Self {
        Self {
            tests: EdfTest::ALL.to_vec(),
            modifications: Modifications::empty(),
            params: None,
            monte_carlo: MonteCarloConfig::default(),
            alpha: DEFAULT_ALPHA,
            emit: Emit::default(),
        }
    }
}

/// Monte Carlo simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Synthetic samples per null distribution
    pub repetitions: usize,
    /// Seed for reproducible runs; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Spread repetitions over threads (needs the `parallel` feature)
    pub parallel: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            seed: None,
            parallel: false,
        }
    }
}

impl GofConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tests.is_empty() {
            return Err(ConfigError::Invalid("at least one test is required".to_string()));
        }

        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::OutOfRange(format!(
                "alpha must be between 0.0 and 1.0, got {}",
                self.alpha
            )));
        }

        if self.monte_carlo.repetitions == 0 {
            return Err(ConfigError::OutOfRange(
                "monte_carlo.repetitions must be positive".to_string(),
            ));
        }

        if let Some(params) = &self.params {
            if !(params.variance.is_finite() && params.variance > 0.0) || !params.mean.is_finite()
            {
                return Err(ConfigError::OutOfRange(format!(
                    "params must have finite mean and positive variance, got {params:?}"
                )));
            }
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for GofError {
    fn from(err: ConfigError) -> Self {
        GofError::configuration(err.to_string())
    }
}
