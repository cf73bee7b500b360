//! Path-dependent Monte Carlo pricers.
//!
//! - [`barrier_mc`]: Single-barrier options (down/up × in/out) with discrete
//!   monitoring at the simulation grid

mod barrier;

pub use barrier::barrier_mc;
