//! Shared error, classification and parameter types.
//!
//! - [`PricingError`]: Errors surfaced by pricing and calibration entry points
//! - [`SolverError`]: Errors from the bracketed root finder
//! - [`OptionType`], [`BarrierDirection`], [`KnockType`]: Contract classification
//! - [`MarketParams`], [`BarrierSpec`]: Per-call pricer inputs

pub mod error;
pub mod market;
pub mod option;

pub use error::{PricingError, SolverError};
pub use market::{BarrierSpec, MarketParams};
pub use option::{BarrierDirection, KnockType, OptionType};
