//! Interest rate instruments valued against a single flat rate.
//!
//! The flat rate doubles as the forward for every accrual period and as the
//! continuously compounded discount rate, which keeps these instruments
//! usable without a curve-building layer.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::rates::{cap_floor_pv, swap_pv, CapFloorKind};
//!
//! let swap = swap_pv(1_000_000.0, 0.03, 0.03, 5.0, 2);
//! assert!(swap.par_rate > 0.03);
//!
//! let cap = cap_floor_pv(1_000_000.0, 0.03, 0.03, 0.2, 5.0, 4, CapFloorKind::Cap);
//! assert!(cap > 0.0);
//! ```

pub mod capfloor;
pub mod swap;

pub use capfloor::{cap_floor_pv, CapFloorKind, DEFAULT_CAP_FREQUENCY};
pub use swap::{swap_pv, SwapValuation, DEFAULT_SWAP_FREQUENCY};

/// Number of accrual periods and their year fraction for a regular
/// schedule of `tenor` years paying `pay_freq` times a year.
///
/// At least one period is always produced; a zero frequency is read as
/// annual.
pub(crate) fn regular_schedule(tenor: f64, pay_freq: u32) -> (usize, f64) {
    let freq = pay_freq.max(1) as f64;
    let periods = (tenor * freq).round().max(1.0) as usize;
    (periods, 1.0 / freq)
}
