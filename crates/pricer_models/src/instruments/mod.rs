//! Instrument valuation on a flat curve.
//!
//! - [`rates`]: caps, floors and plain-vanilla swaps

pub mod rates;

pub use rates::{cap_floor_pv, swap_pv, CapFloorKind, SwapValuation};
