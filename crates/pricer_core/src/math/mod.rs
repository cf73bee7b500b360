//! Numerical building blocks.
//!
//! - [`distributions`]: `erf`, standard normal CDF and PDF
//! - [`solvers`]: Brent's bracketed root finder
//! - [`stats`]: mean and variance helpers

pub mod distributions;
pub mod solvers;
pub mod stats;
