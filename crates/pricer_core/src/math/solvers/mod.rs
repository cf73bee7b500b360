//! Bracketed root finding.
//!
//! [`BrentSolver`] combines inverse quadratic interpolation, the secant step
//! and bisection. It needs no derivatives and only fails when the initial
//! interval does not bracket a sign change; running out of iterations yields
//! the best estimate found so far.
//!
//! Used for implied volatility inversion and as the line search inside the
//! SABR coordinate-descent calibrator.
//!
//! ## Configuration
//!
//! [`SolverConfig`] carries:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::new(1e-12, 100));
//! let root = solver.find_root(|x: f64| x.exp() - 2.0, 0.0, 1.0).unwrap();
//! assert!((root - 2.0_f64.ln()).abs() < 1e-10);
//! ```

mod brent;
mod config;

pub use brent::{BrentSolver, RootResult};
pub use config::SolverConfig;
