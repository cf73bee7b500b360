//! Barrier command implementation
//!
//! Prices a single-barrier option with the Haug closed form (continuous
//! monitoring) and/or the Monte Carlo engine (monitoring at every step).

use pricer_core::types::{BarrierDirection, BarrierSpec, KnockType, MarketParams};
use pricer_models::analytical::{barrier_price, BarrierResult};
use pricer_pricing::mc::McOptions;
use pricer_pricing::path_dependent::barrier_mc;
use serde::Serialize;
use tracing::{info, warn};

use super::price::McReport;
use super::print_json;
use crate::{Method, Result};

/// Output of `quantcore barrier`
#[derive(Debug, Serialize)]
pub struct BarrierReport {
    /// Contract echoed back
    pub spec: BarrierSpec,
    /// Whether spot is already through the barrier
    pub breached: bool,
    /// Continuously monitored closed form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_form: Option<BarrierResult>,
    /// Discretely monitored simulation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monte_carlo: Option<McReport>,
}

/// Build the barrier report without printing it
pub fn report(spec: &BarrierSpec, method: Method, options: &McOptions) -> Result<BarrierReport> {
    let breached = spec.is_breached();
    if breached {
        warn!(
            spot = spec.market.spot,
            barrier = spec.barrier,
            "Spot already through the barrier"
        );
    }

    let closed_form = method.analytic().then(|| barrier_price(spec));
    let monte_carlo = if method.monte_carlo() {
        Some(McReport::new(barrier_mc(spec, options)?, options))
    } else {
        None
    };

    Ok(BarrierReport {
        spec: *spec,
        breached,
        closed_form,
        monte_carlo,
    })
}

/// Run the barrier command
pub fn run(
    market: &MarketParams,
    barrier: f64,
    direction: BarrierDirection,
    knock: KnockType,
    method: Method,
    options: &McOptions,
) -> Result<()> {
    let spec = BarrierSpec::new(*market, barrier, direction, knock);
    info!(barrier, ?direction, ?knock, ?method, "Pricing barrier option");
    print_json(&report(&spec, method, options)?)
}
