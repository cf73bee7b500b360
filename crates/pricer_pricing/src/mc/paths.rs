//! Geometric Brownian motion path generation.
//!
//! Log-Euler scheme, exact for GBM at the grid points:
//! ```text
//! S(t+dt) = S(t) × exp((μ - ½σ²)dt + σ√dt × Z)
//! ```
//! Every step consumes one [`XorShift32::normal_pair`] draw, so a path of
//! `steps` steps advances the generator by the same number of pairs whether
//! or not the mirrored path is built.

use super::error::ConfigError;
use crate::rng::XorShift32;

/// Parameters for GBM path generation.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{gbm_path, GbmParams};
/// use pricer_pricing::rng::XorShift32;
///
/// let params = GbmParams::new(100.0, 0.05, 0.2, 1.0 / 252.0, 252);
/// let path = gbm_path(&params, &mut XorShift32::new(1));
///
/// assert_eq!(path.len(), 253);
/// assert_eq!(path[0], 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GbmParams {
    /// Initial price (S₀).
    pub s0: f64,
    /// Drift (μ), annualised. `r - q` under the risk-neutral measure.
    pub mu: f64,
    /// Volatility (σ), annualised.
    pub sigma: f64,
    /// Step length in years.
    pub dt: f64,
    /// Number of steps; the path has `steps + 1` points.
    pub steps: usize,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(s0: f64, mu: f64, sigma: f64, dt: f64, steps: usize) -> Self {
        Self {
            s0,
            mu,
            sigma,
            dt,
            steps,
        }
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidParameter` when `s0` is not positive, `sigma` or
    /// `dt` is negative, or any input is not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.s0 > 0.0 && self.s0.is_finite()) {
            return Err(ConfigError::invalid_parameter(
                "s0",
                format!("{} must be positive and finite", self.s0),
            ));
        }
        if !self.mu.is_finite() {
            return Err(ConfigError::invalid_parameter("mu", "must be finite"));
        }
        if !(self.sigma >= 0.0 && self.sigma.is_finite()) {
            return Err(ConfigError::invalid_parameter(
                "sigma",
                format!("{} must be non-negative and finite", self.sigma),
            ));
        }
        if !(self.dt >= 0.0 && self.dt.is_finite()) {
            return Err(ConfigError::invalid_parameter(
                "dt",
                format!("{} must be non-negative and finite", self.dt),
            ));
        }
        Ok(())
    }

    #[inline]
    fn increments(&self) -> (f64, f64) {
        let drift = (self.mu - 0.5 * self.sigma * self.sigma) * self.dt;
        let vol = self.sigma * self.dt.sqrt();
        (drift, vol)
    }
}

/// Generates one GBM path of `steps + 1` prices starting at `s0`.
///
/// Uses the first member of each normal pair.
pub fn gbm_path(params: &GbmParams, rng: &mut XorShift32) -> Vec<f64> {
    let (drift, vol) = params.increments();
    let mut path = Vec::with_capacity(params.steps + 1);
    let mut s = params.s0;
    path.push(s);
    for _ in 0..params.steps {
        let (z, _) = rng.normal_pair();
        s *= (drift + vol * z).exp();
        path.push(s);
    }
    path
}

/// Generates a GBM path and its antithetic mirror from the same draws.
///
/// The first path is identical to what [`gbm_path`] produces from the same
/// generator state; the second uses the negated normals.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{gbm_path, gbm_path_pair, GbmParams};
/// use pricer_pricing::rng::XorShift32;
///
/// let params = GbmParams::new(100.0, 0.0, 0.2, 0.1, 10);
/// let (path, mirror) = gbm_path_pair(&params, &mut XorShift32::new(3));
/// assert_eq!(path, gbm_path(&params, &mut XorShift32::new(3)));
///
/// // With zero drift correction the log-returns cancel pairwise
/// let drift = -0.5 * 0.2 * 0.2 * 0.1;
/// let lhs = (path[1] / 100.0).ln() + (mirror[1] / 100.0).ln();
/// assert!((lhs - 2.0 * drift).abs() < 1e-12);
/// ```
pub fn gbm_path_pair(params: &GbmParams, rng: &mut XorShift32) -> (Vec<f64>, Vec<f64>) {
    let (drift, vol) = params.increments();
    let mut path = Vec::with_capacity(params.steps + 1);
    let mut mirror = Vec::with_capacity(params.steps + 1);
    let mut s = params.s0;
    let mut s_anti = params.s0;
    path.push(s);
    mirror.push(s_anti);
    for _ in 0..params.steps {
        let (z, z_anti) = rng.normal_pair();
        s *= (drift + vol * z).exp();
        s_anti *= (drift + vol * z_anti).exp();
        path.push(s);
        mirror.push(s_anti);
    }
    (path, mirror)
}
