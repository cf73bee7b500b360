//! Black–Scholes pricing for European options with a continuous dividend
//! yield.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! Gamma and vega are built from the dividend-discounted density
//! `e^(-qT)·n(d₁)`.

use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::types::{MarketParams, OptionType};

/// First-order and second-order sensitivities of an option price.
///
/// Vega is per unit of volatility (1.00 = 100 vol points), theta is per
/// year of calendar decay and rho is per unit of the domestic rate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// -∂V/∂T
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

/// Price together with its Greeks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BsResult {
    /// Present value
    pub price: f64,
    /// Closed-form sensitivities
    pub greeks: Greeks,
}

/// Forward price `S·e^((r-q)T)`.
///
/// Also serves FX forwards with `q` set to the foreign rate.
///
/// # Examples
/// ```
/// use pricer_models::analytical::forward_price;
///
/// let fwd = forward_price(100.0, 0.05, 0.05, 2.0);
/// assert!((fwd - 100.0).abs() < 1e-12);
/// ```
#[inline]
pub fn forward_price(spot: f64, rate: f64, dividend: f64, maturity: f64) -> f64 {
    spot * ((rate - dividend) * maturity).exp()
}

/// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
#[inline]
pub fn d1(params: &MarketParams) -> f64 {
    let vol_sqrt_t = params.volatility * params.maturity.sqrt();
    ((params.spot / params.strike).ln()
        + (params.rate - params.dividend + 0.5 * params.volatility * params.volatility)
            * params.maturity)
        / vol_sqrt_t
}

/// d₂ = d₁ - σ√T
#[inline]
pub fn d2(params: &MarketParams) -> f64 {
    d1(params) - params.volatility * params.maturity.sqrt()
}

/// Whether the closed form is undefined for these inputs and the discounted
/// forward intrinsic value applies instead.
#[inline]
pub(crate) fn is_degenerate(params: &MarketParams) -> bool {
    !(params.maturity > 0.0
        && params.volatility > 0.0
        && params.spot > 0.0
        && params.strike > 0.0)
}

/// Prices a European option and its Greeks under Black–Scholes.
///
/// Expired options, zero volatility and non-positive spot or strike never
/// produce NaN: the price is the discounted intrinsic value of the forward,
/// `e^(-rT)·max(φ(F - K), 0)`, with delta equal to `φ·e^(-qT)` in the money
/// and every other Greek zero.
///
/// # Examples
/// ```
/// use pricer_core::types::{MarketParams, OptionType};
/// use pricer_models::analytical::black_scholes;
///
/// let call = MarketParams::new(100.0, 100.0, 0.02, 0.0, 0.2, 1.0, OptionType::Call);
/// let put = call.with_option_type(OptionType::Put);
///
/// let c = black_scholes(&call).price;
/// let p = black_scholes(&put).price;
/// let parity = 100.0 - 100.0 * (-0.02_f64).exp();
/// assert!((c - p - parity).abs() < 1e-6);
/// ```
pub fn black_scholes(params: &MarketParams) -> BsResult {
    if is_degenerate(params) {
        return degenerate(params);
    }

    let s = params.spot;
    let k = params.strike;
    let t = params.maturity;
    let vol = params.volatility;
    let sqrt_t = t.sqrt();
    let df = params.discount_factor();
    let qf = params.dividend_factor();

    let d1 = d1(params);
    let d2 = d1 - vol * sqrt_t;
    let density = qf * norm_pdf(d1);

    let gamma = density / (s * vol * sqrt_t);
    let vega = s * density * sqrt_t;
    let decay = -s * density * vol / (2.0 * sqrt_t);

    let (price, delta, theta, rho) = match params.option_type {
        OptionType::Call => {
            let nd1 = norm_cdf(d1);
            let nd2 = norm_cdf(d2);
            (
                s * qf * nd1 - k * df * nd2,
                qf * nd1,
                decay - params.rate * k * df * nd2 + params.dividend * s * qf * nd1,
                k * t * df * nd2,
            )
        }
        OptionType::Put => {
            let nmd1 = norm_cdf(-d1);
            let nmd2 = norm_cdf(-d2);
            (
                k * df * nmd2 - s * qf * nmd1,
                qf * (norm_cdf(d1) - 1.0),
                decay + params.rate * k * df * nmd2 - params.dividend * s * qf * nmd1,
                -k * t * df * nmd2,
            )
        }
    };

    BsResult {
        price,
        greeks: Greeks {
            delta,
            gamma,
            vega,
            theta,
            rho,
        },
    }
}

fn degenerate(params: &MarketParams) -> BsResult {
    let t = params.maturity.max(0.0);
    let forward = forward_price(params.spot, params.rate, params.dividend, t);
    let intrinsic = params.option_type.payoff(forward, params.strike);
    let delta = if intrinsic > 0.0 {
        params.option_type.sign() * (-params.dividend * t).exp()
    } else {
        0.0
    };

    BsResult {
        price: (-params.rate * t).exp() * intrinsic,
        greeks: Greeks {
            delta,
            ..Greeks::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    fn atm_call() -> MarketParams {
        MarketParams::new(100.0, 100.0, 0.02, 0.0, 0.2, 1.0, OptionType::Call)
    }

    fn price(params: MarketParams) -> f64 {
        black_scholes(&params).price
    }

    #[test]
    fn test_reference_call_price() {
        assert_abs_diff_eq!(price(atm_call()), 8.916, epsilon = 1e-3);
    }

    #[test]
    fn test_d1_d2() {
        let p = atm_call();
        assert_relative_eq!(d1(&p), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(d2(&p), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_put_call_parity_with_dividend() {
        let call = MarketParams::new(105.0, 95.0, 0.04, 0.03, 0.35, 2.0, OptionType::Call);
        let put = call.with_option_type(OptionType::Put);
        let lhs = price(call) - price(put);
        let rhs = 105.0 * (-0.06_f64).exp() - 95.0 * (-0.08_f64).exp();
        assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-6);
    }

    #[test]
    fn test_greeks_match_finite_differences() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let p = MarketParams::new(100.0, 105.0, 0.03, 0.01, 0.25, 0.75, option_type);
            let g = black_scholes(&p).greeks;

            let hs = 0.1;
            let up = price(MarketParams { spot: p.spot + hs, ..p });
            let dn = price(MarketParams { spot: p.spot - hs, ..p });
            assert_abs_diff_eq!(g.delta, (up - dn) / (2.0 * hs), epsilon = 1e-3);

            let hg = 1.0;
            let up = price(MarketParams { spot: p.spot + hg, ..p });
            let dn = price(MarketParams { spot: p.spot - hg, ..p });
            let gamma_fd = (up - 2.0 * price(p) + dn) / (hg * hg);
            assert_abs_diff_eq!(g.gamma, gamma_fd, epsilon = 1e-3);

            let hv = 1e-3;
            let up = price(MarketParams { volatility: p.volatility + hv, ..p });
            let dn = price(MarketParams { volatility: p.volatility - hv, ..p });
            assert_abs_diff_eq!(g.vega, (up - dn) / (2.0 * hv), epsilon = 0.05);

            let ht = 1e-3;
            let up = price(MarketParams { maturity: p.maturity + ht, ..p });
            let dn = price(MarketParams { maturity: p.maturity - ht, ..p });
            assert_abs_diff_eq!(g.theta, -(up - dn) / (2.0 * ht), epsilon = 0.05);

            let hr = 1e-3;
            let up = price(MarketParams { rate: p.rate + hr, ..p });
            let dn = price(MarketParams { rate: p.rate - hr, ..p });
            assert_abs_diff_eq!(g.rho, (up - dn) / (2.0 * hr), epsilon = 0.05);
        }
    }

    #[test]
    fn test_gamma_vega_use_dividend_discounted_density() {
        let p = MarketParams::new(100.0, 100.0, 0.02, 0.05, 0.2, 2.0, OptionType::Call);
        let g = black_scholes(&p).greeks;
        let density = (-0.1_f64).exp() * norm_pdf(d1(&p));
        assert_relative_eq!(g.vega, 100.0 * density * 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(
            g.gamma,
            density / (100.0 * 0.2 * 2.0_f64.sqrt()),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_expired_option_is_intrinsic() {
        let call = MarketParams::new(110.0, 100.0, 0.05, 0.0, 0.2, 0.0, OptionType::Call);
        let r = black_scholes(&call);
        assert_eq!(r.price, 10.0);
        assert_eq!(r.greeks.delta, 1.0);
        assert_eq!(r.greeks.gamma, 0.0);

        let put = call.with_option_type(OptionType::Put);
        let r = black_scholes(&put);
        assert_eq!(r.price, 0.0);
        assert_eq!(r.greeks.delta, 0.0);
    }

    #[test]
    fn test_zero_vol_is_discounted_forward_intrinsic() {
        let call = MarketParams::new(100.0, 100.0, 0.05, 0.0, 0.0, 1.0, OptionType::Call);
        let r = black_scholes(&call);
        let expected = (-0.05_f64).exp() * (100.0 * 0.05_f64.exp() - 100.0);
        assert_relative_eq!(r.price, expected, epsilon = 1e-12);
        assert_relative_eq!(r.greeks.delta, 1.0, epsilon = 1e-12);
        assert!(r.greeks.vega == 0.0 && r.greeks.theta == 0.0);

        let put = call.with_option_type(OptionType::Put);
        assert_eq!(black_scholes(&put).price, 0.0);
    }

    #[test]
    fn test_negative_maturity_is_finite() {
        let p = MarketParams::new(90.0, 100.0, 0.05, 0.0, 0.2, -1.0, OptionType::Put);
        assert_eq!(price(p), 10.0);
    }

    #[test]
    fn test_deep_otm_call_is_near_zero() {
        let p = MarketParams::new(50.0, 200.0, 0.01, 0.0, 0.1, 0.5, OptionType::Call);
        let r = black_scholes(&p);
        assert!(r.price >= 0.0 && r.price < 1e-10);
    }

    proptest! {
        #[test]
        fn prop_put_call_parity(
            s in 20.0..200.0_f64,
            k in 20.0..200.0_f64,
            r in -0.02..0.10_f64,
            q in 0.0..0.08_f64,
            vol in 0.05..0.8_f64,
            t in 0.05..5.0_f64,
        ) {
            let call = MarketParams::new(s, k, r, q, vol, t, OptionType::Call);
            let put = call.with_option_type(OptionType::Put);
            let lhs = price(call) - price(put);
            let rhs = s * (-q * t).exp() - k * (-r * t).exp();
            prop_assert!((lhs - rhs).abs() < 1e-6, "parity gap {}", lhs - rhs);
        }

        #[test]
        fn prop_price_within_no_arbitrage_bounds(
            s in 20.0..200.0_f64,
            k in 20.0..200.0_f64,
            vol in 0.05..0.8_f64,
            t in 0.05..5.0_f64,
        ) {
            let p = MarketParams::new(s, k, 0.03, 0.01, vol, t, OptionType::Call);
            let c = price(p);
            let lower = (s * (-0.01 * t).exp() - k * (-0.03 * t).exp()).max(0.0);
            prop_assert!(c >= lower - 1e-6);
            prop_assert!(c <= s * (-0.01 * t).exp() + 1e-9);
        }
    }
}
