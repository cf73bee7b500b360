//! Monte Carlo simulation engine.
//!
//! # Architecture
//!
//! ```text
//! product pricer (european_mc, barrier_mc)
//! ├── McOptions         (paths, steps, antithetic, seed)
//! ├── gbm_path[_pair]   (log-Euler GBM paths from XorShift32)
//! └── monte_carlo       (pure aggregation: mean and standard error)
//! ```
//!
//! The engine never discounts or evaluates payoffs. Pricers pass it a
//! closure `(rng, index) -> discounted payoff` and own the product logic.
//!
//! # Example
//!
//! ```rust
//! use pricer_pricing::mc::{gbm_path, monte_carlo, GbmParams, McOptions};
//!
//! let options = McOptions::builder().paths(10_000).steps(12).seed(42).build().unwrap();
//! let gbm = GbmParams::new(100.0, 0.05, 0.2, 1.0 / 12.0, 12);
//! let df = (-0.05_f64).exp();
//!
//! let estimate = monte_carlo(&options, |rng, _| {
//!     let path = gbm_path(&gbm, rng);
//!     df * (path[12] - 100.0).max(0.0)
//! })
//! .unwrap();
//! assert!(estimate.price > 9.0 && estimate.price < 12.0);
//! ```

mod config;
mod engine;
mod error;
mod paths;
mod pricer;

pub use config::{McOptions, McOptionsBuilder, MAX_PATHS, MAX_STEPS};
pub use engine::{monte_carlo, monte_carlo_seeds, PriceEstimate};
pub use error::ConfigError;
pub use paths::{gbm_path, gbm_path_pair, GbmParams};
pub use pricer::european_mc;
pub(crate) use pricer::risk_neutral_gbm;
