//! SABR stochastic volatility model.
//!
//! The SABR (Stochastic Alpha, Beta, Rho) dynamics are:
//! ```text
//! dF = alpha * F^beta * dW_F
//! d(alpha) = nu * alpha * dW_alpha
//! E[dW_F * dW_alpha] = rho * dt
//! ```
//!
//! where:
//! - F = forward price
//! - alpha = instantaneous volatility
//! - beta = CEV exponent (0: normal, 1: lognormal)
//! - nu = volatility of volatility
//! - rho = correlation between forward and volatility
//!
//! ## Hagan formula
//!
//! Implied Black volatilities come from the Hagan et al. (2002) lognormal
//! approximation. At the money the `z / x(z)` factor is a removable
//! singularity and is replaced by its limit 1.
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::sabr::{hagan_iv, SabrParams};
//!
//! let params = SabrParams::new(0.2, 1.0, -0.3, 0.4).unwrap();
//! let atm = hagan_iv(100.0, 100.0, 1.0, &params);
//! assert!(atm.is_finite() && atm > 0.19);
//! ```

use thiserror::Error;

/// `|z|` below which `z / x(z)` is taken as its ATM limit.
const ATM_Z_THRESHOLD: f64 = 1e-8;

/// SABR parameter validation errors.
///
/// # Examples
///
/// ```
/// use pricer_models::models::sabr::SabrError;
///
/// let err = SabrError::InvalidAlpha(-0.1);
/// assert!(format!("{}", err).contains("-0.1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SabrError {
    /// Alpha must be positive.
    #[error("Invalid alpha: {0} (must be positive)")]
    InvalidAlpha(f64),

    /// Beta must lie in [0, 1].
    #[error("Invalid beta: {0} (must be in [0, 1])")]
    InvalidBeta(f64),

    /// Rho must lie in the open interval (-1, 1).
    #[error("Invalid rho: {0} (must be in (-1, 1))")]
    InvalidRho(f64),

    /// Nu must be positive.
    #[error("Invalid nu: {0} (must be positive)")]
    InvalidNu(f64),
}

/// SABR parameters for one forward/maturity slice.
///
/// The forward is not part of the parameter set; it is supplied when the
/// smile is evaluated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SabrParams {
    /// Initial volatility (alpha > 0)
    pub alpha: f64,
    /// CEV exponent (0 <= beta <= 1)
    pub beta: f64,
    /// Forward/volatility correlation (-1 < rho < 1)
    pub rho: f64,
    /// Volatility of volatility (nu > 0)
    pub nu: f64,
}

impl SabrParams {
    /// Creates validated SABR parameters.
    ///
    /// # Errors
    /// The first parameter outside its domain, checked in the order alpha,
    /// beta, rho, nu.
    pub fn new(alpha: f64, beta: f64, rho: f64, nu: f64) -> Result<Self, SabrError> {
        let params = Self {
            alpha,
            beta,
            rho,
            nu,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks every parameter against its domain.
    pub fn validate(&self) -> Result<(), SabrError> {
        if !(self.alpha > 0.0 && self.alpha.is_finite()) {
            return Err(SabrError::InvalidAlpha(self.alpha));
        }
        if !(0.0..=1.0).contains(&self.beta) {
            return Err(SabrError::InvalidBeta(self.beta));
        }
        if !(self.rho > -1.0 && self.rho < 1.0) {
            return Err(SabrError::InvalidRho(self.rho));
        }
        if !(self.nu > 0.0 && self.nu.is_finite()) {
            return Err(SabrError::InvalidNu(self.nu));
        }
        Ok(())
    }
}

/// Hagan lognormal implied volatility for strike `strike` and expiry
/// `maturity` on forward `forward`.
///
/// ```text
/// z    = (ν/α)(fk)^((1-β)/2) ln(f/k)
/// x(z) = ln((√(1 - 2ρz + z²) + z - ρ) / (1 - ρ))
/// A    = α / ((fk)^((1-β)/2) (1 + (1-β)²/24 ln²(f/k) + (1-β)⁴/1920 ln⁴(f/k)))
/// B    = 1 + ((1-β)²/24 α²/(fk)^(1-β) + ρβνα/(4(fk)^((1-β)/2)) + (2-3ρ²)ν²/24) t
/// σ    = A · z/x(z) · B
/// ```
///
/// Forward and strike must be positive; otherwise the result is NaN.
pub fn hagan_iv(forward: f64, strike: f64, maturity: f64, params: &SabrParams) -> f64 {
    let SabrParams {
        alpha,
        beta,
        rho,
        nu,
    } = *params;

    let one_minus_beta = 1.0 - beta;
    let omb2 = one_minus_beta * one_minus_beta;
    let fk_pow = (forward * strike).powf(0.5 * one_minus_beta);
    let log_fk = (forward / strike).ln();
    let log_fk2 = log_fk * log_fk;

    let z = nu / alpha * fk_pow * log_fk;
    let z_over_x = if z.abs() < ATM_Z_THRESHOLD {
        1.0
    } else {
        z / x_of_z(z, rho)
    };

    let a = alpha / (fk_pow * (1.0 + omb2 / 24.0 * log_fk2 + omb2 * omb2 / 1920.0 * log_fk2 * log_fk2));
    let b = 1.0
        + (omb2 / 24.0 * alpha * alpha / (fk_pow * fk_pow)
            + rho * beta * nu * alpha / (4.0 * fk_pow)
            + (2.0 - 3.0 * rho * rho) / 24.0 * nu * nu)
            * maturity;

    a * z_over_x * b
}

/// x(z) = ln((√(1-2ρz+z²) + z - ρ) / (1-ρ))
fn x_of_z(z: f64, rho: f64) -> f64 {
    let discriminant = (1.0 - 2.0 * rho * z + z * z).max(0.0);
    ((discriminant.sqrt() + z - rho) / (1.0 - rho)).ln()
}
