//! Monte Carlo pricer for European options.
//!
//! Serves as the cross-check for the closed-form Black–Scholes price: the
//! terminal price is simulated under the risk-neutral drift `r - q` and the
//! discounted payoff handed to [`monte_carlo`].

use pricer_core::types::MarketParams;

use super::config::McOptions;
use super::engine::{monte_carlo, PriceEstimate};
use super::error::ConfigError;
use super::paths::{gbm_path, gbm_path_pair, GbmParams};

/// Risk-neutral GBM parameters for `params` on an `steps`-step grid.
pub(crate) fn risk_neutral_gbm(params: &MarketParams, steps: usize) -> GbmParams {
    GbmParams::new(
        params.spot,
        params.rate - params.dividend,
        params.volatility,
        params.maturity / steps as f64,
        steps,
    )
}

/// Prices a European option by simulation.
///
/// With `options.antithetic` each trial averages the payoffs of a path and
/// its mirror, so `paths` trials consume `paths × steps` normal pairs either
/// way.
///
/// # Errors
///
/// `ConfigError` when the options are invalid, or when spot is not positive,
/// volatility is negative or maturity is negative.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{MarketParams, OptionType};
/// use pricer_pricing::mc::{european_mc, McOptions};
///
/// let params = MarketParams::new(100.0, 100.0, 0.02, 0.0, 0.2, 1.0, OptionType::Call);
/// let options = McOptions::builder().paths(20_000).steps(1).seed(1).build().unwrap();
/// let estimate = european_mc(&params, &options).unwrap();
///
/// // Black–Scholes value is about 8.916
/// assert!((estimate.price - 8.916).abs() < 4.0 * estimate.standard_error);
/// ```
pub fn european_mc(params: &MarketParams, options: &McOptions) -> Result<PriceEstimate, ConfigError> {
    let gbm = risk_neutral_gbm(params, options.steps);
    gbm.validate()?;

    let df = params.discount_factor();
    let strike = params.strike;
    let option_type = params.option_type;
    let last = options.steps;

    monte_carlo(options, |rng, _| {
        if options.antithetic {
            let (path, mirror) = gbm_path_pair(&gbm, rng);
            0.5 * df * (option_type.payoff(path[last], strike) + option_type.payoff(mirror[last], strike))
        } else {
            let path = gbm_path(&gbm, rng);
            df * option_type.payoff(path[last], strike)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::OptionType;

    fn atm_call() -> MarketParams {
        MarketParams::new(100.0, 100.0, 0.02, 0.0, 0.2, 1.0, OptionType::Call)
    }

    #[test]
    fn test_zero_vol_is_discounted_forward_intrinsic() {
        let params = MarketParams {
            volatility: 0.0,
            ..atm_call()
        };
        let options = McOptions::builder().paths(10).steps(4).build().unwrap();
        let estimate = european_mc(&params, &options).unwrap();
        let expected = (100.0 * 0.02_f64.exp() - 100.0) * (-0.02_f64).exp();
        assert!((estimate.price - expected).abs() < 1e-10);
        assert!(estimate.standard_error < 1e-12);
    }

    #[test]
    fn test_antithetic_reduces_error() {
        let options = McOptions::builder().paths(20_000).steps(1).seed(4).build().unwrap();
        let plain = european_mc(&atm_call(), &options).unwrap();
        let anti = european_mc(
            &atm_call(),
            &McOptions {
                antithetic: true,
                ..options
            },
        )
        .unwrap();
        assert!(anti.standard_error < plain.standard_error);
    }

    #[test]
    fn test_put_call_parity_in_simulation() {
        // Same seed ⇒ same paths, so C - P equals the sample mean of
        // df (S_T - K) exactly
        let options = McOptions::builder().paths(50_000).steps(1).seed(21).build().unwrap();
        let call = european_mc(&atm_call(), &options).unwrap();
        let put = european_mc(&atm_call().with_option_type(OptionType::Put), &options).unwrap();
        let parity = 100.0 - 100.0 * (-0.02_f64).exp();
        assert!((call.price - put.price - parity).abs() < 0.4);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let options = McOptions::default();
        let bad_spot = MarketParams {
            spot: -1.0,
            ..atm_call()
        };
        assert!(european_mc(&bad_spot, &options).is_err());

        let bad_vol = MarketParams {
            volatility: -0.1,
            ..atm_call()
        };
        assert!(european_mc(&bad_vol, &options).is_err());
    }
}
