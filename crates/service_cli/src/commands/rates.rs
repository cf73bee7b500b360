//! Cap/floor and swap command implementations

use pricer_models::instruments::rates::{cap_floor_pv, swap_pv, CapFloorKind, SwapValuation};
use serde::Serialize;
use tracing::info;

use super::print_json;
use crate::{CliError, Result};

/// Output of `quantcore cap-floor`
#[derive(Debug, Serialize)]
pub struct CapFloorReport {
    /// Cap or floor
    pub kind: CapFloorKind,
    /// Present value
    pub pv: f64,
}

fn check_frequency(freq: u32) -> Result<()> {
    if freq == 0 {
        return Err(CliError::invalid_argument("--freq must be at least 1"));
    }
    Ok(())
}

/// Run the cap-floor command
pub fn run_cap_floor(
    notional: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    tenor: f64,
    freq: u32,
    is_cap: bool,
) -> Result<()> {
    check_frequency(freq)?;
    let kind = CapFloorKind::from_is_cap(is_cap);
    let pv = cap_floor_pv(notional, strike, rate, vol, tenor, freq, kind);
    info!(?kind, pv, "Cap/floor priced");
    print_json(&CapFloorReport { kind, pv })
}

/// Run the swap command
pub fn run_swap(notional: f64, fixed: f64, rate: f64, tenor: f64, freq: u32) -> Result<()> {
    check_frequency(freq)?;
    let valuation: SwapValuation = swap_pv(notional, fixed, rate, tenor, freq);
    info!(pv = valuation.pv, par_rate = valuation.par_rate, "Swap valued");
    print_json(&valuation)
}
