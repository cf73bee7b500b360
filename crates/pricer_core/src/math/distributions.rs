//! Error function and standard normal distribution.
//!
//! This module provides:
//! - `erf`: Abramowitz and Stegun rational approximation (formula 7.1.26)
//! - `norm_cdf`: Cumulative distribution function Φ(x)
//! - `norm_pdf`: Probability density function φ(x)
//!
//! All functions are generic over `T: Float` so that `f32` and `f64` callers
//! share one implementation.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Abramowitz and Stegun 7.1.26 coefficients.
const A1: f64 = 0.254_829_592;
const A2: f64 = -0.284_496_736;
const A3: f64 = 1.421_413_741;
const A4: f64 = -1.453_152_027;
const A5: f64 = 1.061_405_429;
const P: f64 = 0.327_591_1;

/// Error function approximation.
///
/// Maximum absolute error is about 1.5e-7. The approximation is evaluated on
/// `|x|` and the sign restored afterwards, so `erf(-x) == -erf(x)` holds
/// exactly and `erf(0) == 0`.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::erf;
///
/// assert_eq!(erf(0.0_f64), 0.0);
/// assert!((erf(1.0_f64) - 0.842_700_79).abs() < 2e-7);
/// assert_eq!(erf(-0.5_f64), -erf(0.5_f64));
/// ```
#[inline]
pub fn erf<T: Float>(x: T) -> T {
    let zero = T::zero();
    if x == zero {
        return zero;
    }

    let one = T::one();
    let c = |v: f64| T::from(v).unwrap();

    let abs_x = x.abs();
    let t = one / (one + c(P) * abs_x);
    // Horner evaluation of a1 t + a2 t² + ... + a5 t⁵
    let poly = ((((c(A5) * t + c(A4)) * t + c(A3)) * t + c(A2)) * t + c(A1)) * t;
    let y = one - poly * (-abs_x * abs_x).exp();

    if x < zero {
        -y
    } else {
        y
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½ (1 + erf(x / √2))
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_cdf;
///
/// assert_eq!(norm_cdf(0.0_f64), 0.5);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap();
    let sqrt_2 = T::from(std::f64::consts::SQRT_2).unwrap();
    half * (T::one() + erf(x / sqrt_2))
}

/// Standard normal probability density function.
///
/// φ(x) = exp(-x² / 2) / √(2π)
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.398_942_280_4).abs() < 1e-10);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap();
    T::from(FRAC_1_SQRT_2PI).unwrap() * (-half * x * x).exp()
}
