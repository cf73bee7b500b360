//! Closed-form pricing formulas.
//!
//! - [`black_scholes`](black_scholes::black_scholes): European options with
//!   a dividend yield, plus analytical Greeks
//! - [`black76`](black76::black76): options on a forward
//! - [`barrier_price`](barrier::barrier_price): the eight single-barrier
//!   options, and [`barrier_out`](barrier::barrier_out) for knock-outs on
//!   the favourable side
//! - [`implied_vol`](implied_vol::implied_vol): Black–Scholes inversion

pub mod barrier;
pub mod black76;
pub mod black_scholes;
pub mod error;
pub mod implied_vol;

pub use barrier::{barrier_out, barrier_price, BarrierResult, BarrierTerms};
pub use black76::black76;
pub use black_scholes::{black_scholes, d1, d2, forward_price, BsResult, Greeks};
pub use error::AnalyticalError;
pub use implied_vol::{implied_vol, IV_LOWER, IV_UPPER};
