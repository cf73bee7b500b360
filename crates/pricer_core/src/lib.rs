//! # pricer_core: Numerics Kernel
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the pricing workspace and provides:
//! - Standard normal distribution functions built on an error-function
//!   approximation (`math::distributions`)
//! - A bracketed, derivative-free root finder (`math::solvers`)
//! - Small summary statistics used by the Monte Carlo engine and the
//!   backtester (`math::stats`)
//! - Error types and option classification shared by the upper layers
//!   (`types`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates and keeps its external
//! dependencies minimal:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - tracing: Diagnostics on solver non-convergence
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::math::solvers::BrentSolver;
//!
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-9);
//!
//! let solver = BrentSolver::with_defaults();
//! let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-8);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for error and configuration types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

/// Re-export of the generic floating-point trait used across the workspace.
pub use num_traits::Float;
