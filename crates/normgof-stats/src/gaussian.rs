//! Gaussian primitives
//!
//! Thin wrappers over `statrs` for the standard normal CDF and quantile
//! function, plus variate generation by inversion.

use rand::distributions::Open01;
use rand::Rng;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::summary::LocationScale;

fn standard_normal() -> Normal {
    Normal::standard()
}

/// Standard normal CDF Φ(z)
pub fn normal_cdf(z: f64) -> f64 {
    standard_normal().cdf(z)
}

/// Standard normal quantile function Φ⁻¹(p) for p in (0, 1)
///
/// Returns NaN outside [0, 1] and ±∞ at the endpoints.
pub fn normal_inverse_cdf(p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    standard_normal().inverse_cdf(p)
}

/// Draw one Gaussian variate as `Φ⁻¹(u)·σ + μ`
///
/// `u` is drawn from the open interval so the quantile stays finite.
pub fn gaussian_variate<R: Rng + ?Sized>(rng: &mut R, params: &LocationScale) -> f64 {
    let u: f64 = rng.sample(Open01);
    normal_inverse_cdf(u) * params.std_dev() + params.mean
}

/// Draw `n` independent Gaussian variates
pub fn gaussian_sample<R: Rng + ?Sized>(rng: &mut R, n: usize, params: &LocationScale) -> Vec<f64> {
    (0..n).map(|_| gaussian_variate(rng, params)).collect()
}
