//! # Pricer Models
//!
//! Closed-form pricers, rates instruments and the SABR smile model.
//!
//! This crate provides:
//! - Black–Scholes, Black-76 and single-barrier closed forms with Greeks
//! - Implied volatility by bracketed root finding
//! - Flat-curve cap/floor and par swap valuation
//! - Hagan SABR implied volatility and a fixed-beta calibrator
//!
//! Every pricer is a pure function of its inputs. Degenerate market data
//! (expired options, zero volatility) produces intrinsic values instead of
//! errors; only violated preconditions surface as `Err`.
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::{MarketParams, OptionType};
//! use pricer_models::analytical::black_scholes;
//!
//! let params = MarketParams::new(100.0, 100.0, 0.02, 0.0, 0.2, 1.0, OptionType::Call);
//! let result = black_scholes(&params);
//! assert!((result.price - 8.916).abs() < 1e-3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod calibration;
pub mod instruments;
pub mod models;
