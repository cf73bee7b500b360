//! Price and implied-vol command implementations
//!
//! European options through the Black–Scholes closed form and the Monte
//! Carlo engine, and Black–Scholes inversion.

use pricer_core::types::MarketParams;
use pricer_models::analytical::{black_scholes, implied_vol, BsResult};
use pricer_pricing::mc::{european_mc, McOptions, PriceEstimate};
use serde::Serialize;
use tracing::info;

use super::print_json;
use crate::{Method, Result};

/// Output of `quantcore price`
#[derive(Debug, Serialize)]
pub struct PriceReport {
    /// Inputs echoed back
    pub market: MarketParams,
    /// Closed-form price and Greeks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub black_scholes: Option<BsResult>,
    /// Simulated price and standard error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monte_carlo: Option<McReport>,
}

/// Monte Carlo estimate with its run settings
#[derive(Debug, Serialize)]
pub struct McReport {
    /// Price and standard error
    #[serde(flatten)]
    pub estimate: PriceEstimate,
    /// Half-width of the 95% confidence interval
    pub ci95: f64,
    /// Settings used
    pub options: McOptions,
}

impl McReport {
    pub(crate) fn new(estimate: PriceEstimate, options: &McOptions) -> Self {
        Self {
            estimate,
            ci95: estimate.confidence_95(),
            options: *options,
        }
    }
}

/// Build the price report without printing it
pub fn report(market: &MarketParams, method: Method, options: &McOptions) -> Result<PriceReport> {
    let black_scholes = method.analytic().then(|| black_scholes(market));
    let monte_carlo = if method.monte_carlo() {
        let estimate = european_mc(market, options)?;
        Some(McReport::new(estimate, options))
    } else {
        None
    };

    Ok(PriceReport {
        market: *market,
        black_scholes,
        monte_carlo,
    })
}

/// Run the price command
pub fn run(market: &MarketParams, method: Method, options: &McOptions) -> Result<()> {
    info!(
        spot = market.spot,
        strike = market.strike,
        option_type = ?market.option_type,
        ?method,
        "Pricing European option"
    );
    print_json(&report(market, method, options)?)
}

/// Output of `quantcore implied-vol`
#[derive(Debug, Serialize)]
pub struct ImpliedVolReport {
    /// Price that was inverted
    pub price: f64,
    /// Volatility reproducing `price`
    pub implied_vol: f64,
}

/// Run the implied-vol command. `market.volatility` is ignored.
pub fn run_implied_vol(price: f64, market: MarketParams) -> Result<()> {
    let vol = implied_vol(
        price,
        market.spot,
        market.strike,
        market.rate,
        market.dividend,
        market.maturity,
        market.option_type,
    )?;
    info!(price, implied_vol = vol, "Implied volatility solved");
    print_json(&ImpliedVolReport {
        price,
        implied_vol: vol,
    })
}
