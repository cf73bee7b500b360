//! # pricer_backtest: Strategy Backtesting
//!
//! ## Layer Role
//!
//! pricer_backtest sits beside the pricing crates and replays a single-asset
//! long/flat strategy over an OHLC series:
//! - Validated input series (`series::Series`), loaded from CSV or generated
//!   from a seeded GBM path (`series::synthetic_gbm_series`)
//! - Technical indicators (`indicators::ema`, `indicators::rsi`)
//! - The per-bar FLAT/LONG state machine with fees and slippage
//!   (`engine::run_backtest`)
//! - Equity-curve statistics (`metrics::Metrics`)
//!
//! Runs are pure functions of `(Series, RunParams)`: no shared state, no
//! I/O beyond the optional CSV loader.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_backtest::{run_backtest, synthetic_gbm_series, RunParams, StrategyKind};
//!
//! let series = synthetic_gbm_series(750, 100.0, 0.08, 0.2, 1).unwrap();
//! let params = RunParams {
//!     strategy: StrategyKind::Rsi,
//!     ..RunParams::default()
//! };
//!
//! let result = run_backtest(&series, &params).unwrap();
//! println!(
//!     "equity {:.4}, sharpe {:.2}, {} fills",
//!     result.final_equity(),
//!     result.metrics.sharpe,
//!     result.metrics.n_trades
//! );
//! ```

#![warn(missing_docs)]

pub mod engine;
mod error;
pub mod indicators;
pub mod metrics;
pub mod series;

pub use engine::{run_backtest, BacktestResult, RunParams, Side, StrategyKind, Trade};
pub use error::BacktestError;
pub use metrics::Metrics;
pub use series::{synthetic_gbm_series, OhlcBar, Series};
