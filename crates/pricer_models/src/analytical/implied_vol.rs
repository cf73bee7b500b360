//! Black–Scholes implied volatility by bracketed root finding.

use pricer_core::math::solvers::BrentSolver;
use pricer_core::types::{MarketParams, OptionType, PricingError};

use super::black_scholes::black_scholes;
use super::error::AnalyticalError;

/// Lower end of the volatility bracket.
pub const IV_LOWER: f64 = 1e-6;

/// Upper end of the volatility bracket.
pub const IV_UPPER: f64 = 5.0;

/// Volatility at which Black–Scholes reproduces `price`.
///
/// Brent's method is run on `[IV_LOWER, IV_UPPER]`.
///
/// # Errors
///
/// - `PricingError::InvalidInput` for non-positive spot, strike or maturity,
///   or a price outside `[discounted intrinsic, S·e^(-qT)]` for calls
///   (`[discounted intrinsic, K·e^(-rT)]` for puts)
/// - the solver's `NoBracket` error, converted, when the price is
///   admissible but needs a volatility outside the bracket
///
/// # Examples
/// ```
/// use pricer_core::types::{MarketParams, OptionType};
/// use pricer_models::analytical::{black_scholes, implied_vol};
///
/// let params = MarketParams::new(100.0, 110.0, 0.03, 0.0, 0.27, 0.5, OptionType::Call);
/// let price = black_scholes(&params).price;
///
/// let vol = implied_vol(price, 100.0, 110.0, 0.03, 0.0, 0.5, OptionType::Call).unwrap();
/// assert!((vol - 0.27).abs() < 1e-6);
/// ```
pub fn implied_vol(
    price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend: f64,
    maturity: f64,
    option_type: OptionType,
) -> Result<f64, PricingError> {
    if !(spot > 0.0) {
        return Err(AnalyticalError::InvalidSpot { spot }.into());
    }
    if !(strike > 0.0) {
        return Err(AnalyticalError::InvalidStrike { strike }.into());
    }
    if !(maturity > 0.0) {
        return Err(AnalyticalError::InvalidMaturity { maturity }.into());
    }

    let template = MarketParams::new(spot, strike, rate, dividend, IV_LOWER, maturity, option_type);
    let spot_leg = spot * template.dividend_factor();
    let strike_leg = strike * template.discount_factor();
    let (lower, upper) = match option_type {
        OptionType::Call => ((spot_leg - strike_leg).max(0.0), spot_leg),
        OptionType::Put => ((strike_leg - spot_leg).max(0.0), strike_leg),
    };

    if !(price >= lower && price <= upper) {
        return Err(AnalyticalError::PriceOutOfBounds {
            price,
            lower,
            upper,
        }
        .into());
    }

    let objective = |vol: f64| {
        black_scholes(&MarketParams {
            volatility: vol,
            ..template
        })
        .price
            - price
    };

    let solver = BrentSolver::with_defaults();
    Ok(solver.find_root(objective, IV_LOWER, IV_UPPER)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_round_trip_call_and_put() {
        for (k, vol, option_type) in [
            (80.0, 0.15, OptionType::Call),
            (100.0, 0.30, OptionType::Call),
            (120.0, 0.55, OptionType::Put),
            (95.0, 0.08, OptionType::Put),
        ] {
            let params = MarketParams::new(100.0, k, 0.02, 0.01, vol, 1.25, option_type);
            let price = black_scholes(&params).price;
            let iv = implied_vol(price, 100.0, k, 0.02, 0.01, 1.25, option_type).unwrap();
            assert_abs_diff_eq!(iv, vol, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_price_above_upper_bound_rejected() {
        let err = implied_vol(101.0, 100.0, 100.0, 0.0, 0.0, 1.0, OptionType::Call).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn test_price_below_intrinsic_rejected() {
        let err = implied_vol(5.0, 120.0, 100.0, 0.0, 0.0, 1.0, OptionType::Call).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));

        let err = implied_vol(f64::NAN, 100.0, 100.0, 0.0, 0.0, 1.0, OptionType::Put).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_contract_rejected() {
        assert!(implied_vol(1.0, 0.0, 100.0, 0.0, 0.0, 1.0, OptionType::Call).is_err());
        assert!(implied_vol(1.0, 100.0, -1.0, 0.0, 0.0, 1.0, OptionType::Call).is_err());
        assert!(implied_vol(1.0, 100.0, 100.0, 0.0, 0.0, 0.0, OptionType::Call).is_err());
    }

    #[test]
    fn test_price_beyond_bracket_is_no_bracket() {
        // Admissible, but needs a volatility far above IV_UPPER.
        let price = 99.99;
        let err = implied_vol(price, 100.0, 100.0, 0.0, 0.0, 1.0, OptionType::Call).unwrap_err();
        match err {
            PricingError::InvalidInput(msg) => assert!(msg.contains("same sign")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
