//! # pricer_pricing: Simulation Layer
//!
//! ## Layer Role
//!
//! pricer_pricing sits on top of `pricer_core` and provides:
//! - A deterministic, seedable random source (`rng::XorShift32`)
//! - GBM path simulation (`mc::gbm_path`, `mc::gbm_path_pair`)
//! - The Monte Carlo aggregation engine (`mc::monte_carlo`) and its
//!   multi-seed parallel variant (`mc::monte_carlo_seeds`)
//! - Product pricers built on the engine: European options
//!   (`mc::european_mc`) and single-barrier options
//!   (`path_dependent::barrier_mc`)
//!
//! ## Concurrency Contract
//!
//! Every run constructs its own generator from `McOptions::seed`. Generators
//! are never shared across runs, so concurrent calls are independent and a
//! given seed always reproduces the same estimate.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::{MarketParams, OptionType};
//! use pricer_pricing::mc::{european_mc, McOptions};
//!
//! let params = MarketParams::new(100.0, 100.0, 0.02, 0.0, 0.2, 1.0, OptionType::Call);
//! let options = McOptions::builder().paths(10_000).steps(1).seed(42).build().unwrap();
//!
//! let estimate = european_mc(&params, &options).unwrap();
//! println!("{:.4} ± {:.4}", estimate.price, estimate.confidence_95());
//! ```

#![warn(missing_docs)]

pub mod mc;
pub mod path_dependent;
pub mod rng;
