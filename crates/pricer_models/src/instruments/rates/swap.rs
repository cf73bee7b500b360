//! Plain-vanilla fixed-for-floating swap on a flat curve.

use super::regular_schedule;

/// Semi-annual payments.
pub const DEFAULT_SWAP_FREQUENCY: u32 = 2;

/// Swap value from the fixed-rate payer's side, with the rate that would
/// make it worth zero.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapValuation {
    /// Floating leg minus fixed leg
    pub pv: f64,
    /// Fixed rate at which `pv` is zero
    pub par_rate: f64,
}

/// Values a pay-fixed swap against a flat continuously compounded rate.
///
/// The floating coupon of period `i` is `N·(e^(r·τ) - 1)`, paid at `t_i` and
/// discounted with `e^(-r·t_i)`; the annuity is `Σ τ·e^(-r·t_i)`. The float
/// leg therefore telescopes to `N·(1 - e^(-r·T))`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::rates::swap_pv;
///
/// let quote = swap_pv(1_000_000.0, 0.0, 0.03, 10.0, 2);
/// let at_par = swap_pv(1_000_000.0, quote.par_rate, 0.03, 10.0, 2);
/// assert!(at_par.pv.abs() < 1e-6);
/// ```
pub fn swap_pv(notional: f64, fixed: f64, rate: f64, tenor: f64, pay_freq: u32) -> SwapValuation {
    let (periods, accrual) = regular_schedule(tenor, pay_freq);
    let coupon = notional * ((rate * accrual).exp() - 1.0);

    let (annuity, pv_float) = (1..=periods).fold((0.0, 0.0), |(annuity, float), i| {
        let df = (-rate * i as f64 * accrual).exp();
        (annuity + accrual * df, float + coupon * df)
    });

    SwapValuation {
        pv: pv_float - notional * fixed * annuity,
        par_rate: pv_float / (notional * annuity),
    }
}
