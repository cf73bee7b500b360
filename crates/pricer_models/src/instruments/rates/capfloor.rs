//! Caps and floors as strips of Black-76 caplets and floorlets.
//!
//! # Payoff
//!
//! For each period i:
//! - **Caplet**: max(F_i - K, 0) × τ × Notional
//! - **Floorlet**: max(K - F_i, 0) × τ × Notional

use pricer_core::types::OptionType;

use super::regular_schedule;
use crate::analytical::black76;

/// Quarterly payments.
pub const DEFAULT_CAP_FREQUENCY: u32 = 4;

/// Cap or floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CapFloorKind {
    /// Strip of calls on the forward rate
    Cap,
    /// Strip of puts on the forward rate
    Floor,
}

impl CapFloorKind {
    /// Builds the kind from the `is_cap` flag used by flat argument lists.
    pub fn from_is_cap(is_cap: bool) -> Self {
        if is_cap {
            CapFloorKind::Cap
        } else {
            CapFloorKind::Floor
        }
    }

    fn option_type(self) -> OptionType {
        match self {
            CapFloorKind::Cap => OptionType::Call,
            CapFloorKind::Floor => OptionType::Put,
        }
    }
}

/// Present value of a cap or floor on a flat curve.
///
/// `n = max(1, round(tenor·pay_freq))` periods of length `τ = 1/pay_freq`;
/// the optionlet on period `i` fixes at `i·τ` on forward `rate` and is
/// priced with Black-76, discounted at `rate`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::rates::{cap_floor_pv, CapFloorKind};
///
/// let cap = cap_floor_pv(100.0, 0.04, 0.05, 0.3, 2.0, 4, CapFloorKind::Cap);
/// let floor = cap_floor_pv(100.0, 0.04, 0.05, 0.3, 2.0, 4, CapFloorKind::Floor);
/// assert!(cap > floor);
/// ```
pub fn cap_floor_pv(
    notional: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    tenor: f64,
    pay_freq: u32,
    kind: CapFloorKind,
) -> f64 {
    let (periods, accrual) = regular_schedule(tenor, pay_freq);
    let option_type = kind.option_type();

    (1..=periods)
        .map(|i| {
            let fixing = i as f64 * accrual;
            notional * accrual * black76(rate, strike, rate, volatility, fixing, option_type)
        })
        .sum()
}
