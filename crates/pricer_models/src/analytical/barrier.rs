//! Closed-form pricing of continuously monitored single-barrier options.
//!
//! # Barrier Types
//!
//! There are 8 types of single-barrier options:
//! - **Down-and-In/Out Call**: Barrier below spot
//! - **Down-and-In/Out Put**: Barrier below spot
//! - **Up-and-In/Out Call**: Barrier above spot
//! - **Up-and-In/Out Put**: Barrier above spot
//!
//! Prices are assembled from the Reiner–Rubinstein building blocks
//! A, B, C and D (zero rebate), in Haug's notation:
//!
//! ```text
//! μ  = (r - q - σ²/2) / σ²
//! λ  = √(μ² + 2(r - q)/σ²)
//! x₁ = ln(S/K)/(σ√T)    + (1 + μ)σ√T     x₂ = ln(S/H)/(σ√T) + (1 + μ)σ√T
//! y₁ = ln(H²/SK)/(σ√T)  + (1 + μ)σ√T     y₂ = ln(H/S)/(σ√T) + (1 + μ)σ√T
//!
//! A = φS e^(-qT) N(φx₁) - φK e^(-rT) N(φx₁ - φσ√T)
//! B = φS e^(-qT) N(φx₂) - φK e^(-rT) N(φx₂ - φσ√T)
//! C = φS e^(-qT) (H/S)^(2(μ+1)) N(ηy₁) - φK e^(-rT) (H/S)^(2μ) N(ηy₁ - ησ√T)
//! D = φS e^(-qT) (H/S)^(2(μ+1)) N(ηy₂) - φK e^(-rT) (H/S)^(2μ) N(ηy₂ - ησ√T)
//! ```
//!
//! with φ = +1 for calls, -1 for puts and η = +1 for down barriers, -1 for
//! up barriers.
//!
//! # Key Relationship
//!
//! **In-Out Parity**: Knock-In + Knock-Out = Vanilla

use pricer_core::math::distributions::norm_cdf;
use pricer_core::types::{BarrierDirection, BarrierSpec, KnockType, MarketParams, OptionType};

use super::black_scholes::{black_scholes, is_degenerate};

/// Intermediate quantities of the closed form, kept for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierTerms {
    /// Drift exponent μ = (r - q - σ²/2)/σ²
    pub mu: f64,
    /// λ = √(μ² + 2(r - q)/σ²)
    pub lambda: f64,
    /// Strike-driven term x₁
    pub x1: f64,
    /// Barrier-driven term x₂
    pub x2: f64,
    /// Reflected strike term y₁
    pub y1: f64,
    /// Reflected barrier term y₂
    pub y2: f64,
}

/// Barrier price together with the terms that produced it.
///
/// `terms` is `None` when the price was settled without the closed form:
/// barrier already breached, expired option or zero volatility.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierResult {
    /// Present value
    pub price: f64,
    /// Closed-form diagnostics
    pub terms: Option<BarrierTerms>,
}

impl BarrierResult {
    fn settled(price: f64) -> Self {
        Self { price, terms: None }
    }
}

/// Prices a single-barrier option with zero rebate.
///
/// Edge cases:
/// - spot already on or beyond the barrier: knock-outs are worth exactly 0,
///   knock-ins are worth the vanilla
/// - expired: knock-outs pay intrinsic, knock-ins pay nothing
/// - zero volatility: the path is the deterministic forward, which either
///   crosses the barrier before expiry or not
///
/// # Examples
/// ```
/// use pricer_core::types::{BarrierDirection, BarrierSpec, KnockType, MarketParams, OptionType};
/// use pricer_models::analytical::{barrier_price, black_scholes};
///
/// let market = MarketParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 1.0, OptionType::Call);
/// let out = barrier_price(&BarrierSpec::new(market, 90.0, BarrierDirection::Down, KnockType::Out));
/// let knock_in = barrier_price(&BarrierSpec::new(market, 90.0, BarrierDirection::Down, KnockType::In));
///
/// let vanilla = black_scholes(&market).price;
/// assert!((out.price + knock_in.price - vanilla).abs() < 1e-8);
/// ```
pub fn barrier_price(spec: &BarrierSpec) -> BarrierResult {
    let m = &spec.market;

    if spec.is_breached() {
        return BarrierResult::settled(match spec.knock {
            KnockType::Out => 0.0,
            KnockType::In => black_scholes(m).price,
        });
    }

    if m.maturity <= 0.0 {
        return BarrierResult::settled(match spec.knock {
            KnockType::Out => m.option_type.payoff(m.spot, m.strike),
            KnockType::In => 0.0,
        });
    }

    if is_degenerate(m) || spec.barrier <= 0.0 {
        let crossed = spec.direction.is_breached(m.forward(), spec.barrier);
        let knocked_out = crossed == (spec.knock == KnockType::Out);
        return BarrierResult::settled(if knocked_out {
            0.0
        } else {
            black_scholes(m).price
        });
    }

    closed_form(spec)
}

/// Knock-out price on the side where the option gains value.
///
/// - `is_call == true`: up-and-out call, dead once spot reaches `barrier`
///   from below (`spot >= barrier` prices at exactly 0).
/// - `is_call == false`: down-and-out put, dead once spot falls to
///   `barrier` (`spot <= barrier` prices at exactly 0).
///
/// A down-and-out call or up-and-out put goes through [`barrier_price`]
/// with an explicit [`BarrierDirection`].
///
/// # Examples
/// ```
/// use pricer_models::analytical::barrier_out;
///
/// let breached = barrier_out(100.0, 100.0, 95.0, 0.05, 0.0, 0.2, 1.0, true);
/// assert_eq!(breached.price, 0.0);
///
/// let live = barrier_out(100.0, 100.0, 130.0, 0.05, 0.0, 0.2, 1.0, true);
/// assert!(live.price > 0.0);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn barrier_out(
    spot: f64,
    strike: f64,
    barrier: f64,
    rate: f64,
    dividend: f64,
    volatility: f64,
    maturity: f64,
    is_call: bool,
) -> BarrierResult {
    let option_type = OptionType::from_is_call(is_call);
    let direction = match option_type {
        OptionType::Call => BarrierDirection::Up,
        OptionType::Put => BarrierDirection::Down,
    };
    let market = MarketParams::new(spot, strike, rate, dividend, volatility, maturity, option_type);
    barrier_price(&BarrierSpec::new(market, barrier, direction, KnockType::Out))
}

fn closed_form(spec: &BarrierSpec) -> BarrierResult {
    let m = &spec.market;
    let (s, k, h) = (m.spot, m.strike, spec.barrier);
    let (r, q, vol, t) = (m.rate, m.dividend, m.volatility, m.maturity);

    let phi = m.option_type.sign();
    let eta = match spec.direction {
        BarrierDirection::Down => 1.0,
        BarrierDirection::Up => -1.0,
    };

    let var = vol * vol;
    let sv = vol * t.sqrt();
    let mu = (r - q - 0.5 * var) / var;
    let lambda = (mu * mu + 2.0 * (r - q) / var).max(0.0).sqrt();

    let shift = (1.0 + mu) * sv;
    let x1 = (s / k).ln() / sv + shift;
    let x2 = (s / h).ln() / sv + shift;
    let y1 = (h * h / (s * k)).ln() / sv + shift;
    let y2 = (h / s).ln() / sv + shift;

    let spot_leg = phi * s * m.dividend_factor();
    let strike_leg = phi * k * m.discount_factor();
    let ratio = h / s;
    let spot_reflect = ratio.powf(2.0 * (mu + 1.0));
    let strike_reflect = ratio.powf(2.0 * mu);

    let a = spot_leg * norm_cdf(phi * x1) - strike_leg * norm_cdf(phi * x1 - phi * sv);
    let b = spot_leg * norm_cdf(phi * x2) - strike_leg * norm_cdf(phi * x2 - phi * sv);
    let c = spot_leg * spot_reflect * norm_cdf(eta * y1)
        - strike_leg * strike_reflect * norm_cdf(eta * y1 - eta * sv);
    let d = spot_leg * spot_reflect * norm_cdf(eta * y2)
        - strike_leg * strike_reflect * norm_cdf(eta * y2 - eta * sv);

    use BarrierDirection::{Down, Up};
    use KnockType::{In, Out};
    use OptionType::{Call, Put};

    let strike_at_or_above = k >= h;
    let price = match (spec.direction, spec.knock, m.option_type, strike_at_or_above) {
        (Down, Out, Call, true) => a - c,
        (Down, Out, Call, false) => b - d,
        (Down, In, Call, true) => c,
        (Down, In, Call, false) => a - b + d,
        (Down, Out, Put, true) => a - b + c - d,
        (Down, Out, Put, false) => 0.0,
        (Down, In, Put, true) => b - c + d,
        (Down, In, Put, false) => a,
        (Up, Out, Call, true) => 0.0,
        (Up, Out, Call, false) => a - b + c - d,
        (Up, In, Call, true) => a,
        (Up, In, Call, false) => b - c + d,
        (Up, Out, Put, true) => b - d,
        (Up, Out, Put, false) => a - c,
        (Up, In, Put, true) => a - b + d,
        (Up, In, Put, false) => c,
    };

    BarrierResult {
        price: price.max(0.0),
        terms: Some(BarrierTerms {
            mu,
            lambda,
            x1,
            x2,
            y1,
            y2,
        }),
    }
}
