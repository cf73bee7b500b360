//! Black-76 pricing of options on a forward.
//!
//! Same d₁/d₂ structure as Black–Scholes with zero drift:
//! `call = e^(-rT)·[F·N(d₁) - K·N(d₂)]`.

use pricer_core::math::distributions::norm_cdf;
use pricer_core::types::OptionType;

/// Black-76 price of a European option on forward `forward`.
///
/// Returns the discounted intrinsic value `e^(-rT)·max(φ(F - K), 0)` when
/// the expiry or volatility is not positive.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::black76;
///
/// let call = black76(0.03, 0.03, 0.03, 0.2, 1.0, OptionType::Call);
/// let put = black76(0.03, 0.03, 0.03, 0.2, 1.0, OptionType::Put);
/// assert!((call - put).abs() < 1e-12);
/// ```
pub fn black76(
    forward: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    option_type: OptionType,
) -> f64 {
    let t = maturity.max(0.0);
    let df = (-rate * t).exp();

    if t <= 0.0 || volatility <= 0.0 || forward <= 0.0 || strike <= 0.0 {
        return df * option_type.payoff(forward, strike);
    }

    let vol_sqrt_t = volatility * t.sqrt();
    let d1 = ((forward / strike).ln() + 0.5 * volatility * volatility * t) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    match option_type {
        OptionType::Call => df * (forward * norm_cdf(d1) - strike * norm_cdf(d2)),
        OptionType::Put => df * (strike * norm_cdf(-d2) - forward * norm_cdf(-d1)),
    }
}
