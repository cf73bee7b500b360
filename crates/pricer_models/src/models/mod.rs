//! Volatility models.
//!
//! - [`sabr`]: SABR parameters and the Hagan implied volatility formula

pub mod sabr;

pub use sabr::{hagan_iv, SabrError, SabrParams};
