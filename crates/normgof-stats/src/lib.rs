//! normgof-stats - EDF goodness-of-fit testing against the Gaussian
//!
//! This crate decides whether a numeric sample plausibly came from a
//! Gaussian, and by how much it deviates:
//!
//! - **Normalization**: z-score, sort, probability integral transform
//! - **Statistics**: Kolmogorov-Smirnov D, Kuiper V, Cramér-von Mises W²,
//!   Watson U², Anderson-Darling A², with finite-sample and
//!   estimated-parameter corrections
//! - **Null distributions**: Monte Carlo simulation for a given n
//! - **P-values**: empirical CDF lookup
//! - **Quantiles**: Parzen "Qmid" interpolation with tie handling
//!
//! # Design Philosophy
//!
//! Everything is batch and in memory. Randomness always comes from an
//! explicit generator or seed, never from hidden global state.

pub mod config;
pub mod error;
pub mod gaussian;
pub mod montecarlo;
pub mod normalize;
pub mod null_cdf;
pub mod quantile;
pub mod report;
pub mod statistic;
pub mod summary;

pub use config::*;
pub use error::*;
pub use gaussian::*;
pub use montecarlo::*;
pub use normalize::*;
pub use null_cdf::*;
pub use quantile::*;
pub use report::*;
pub use statistic::*;
pub use summary::*;
