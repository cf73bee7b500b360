//! CLI command implementations
//!
//! Each submodule builds a serialisable report from the library crates and
//! prints it as pretty JSON on stdout.

use serde::Serialize;

use crate::Result;

pub mod backtest;
pub mod barrier;
pub mod calibrate;
pub mod price;
pub mod rates;

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
