//! # Random Number Generation
//!
//! Deterministic, seedable random source for Monte Carlo simulations.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: identical seed ⇒ identical sequence, on every platform
//! - **Ownership**: the generator is a plain mutable state; each simulation
//!   (or each thread) constructs its own instance and passes it by `&mut`
//! - **Interop**: [`XorShift32`] implements `rand::RngCore` and
//!   `rand::SeedableRng`, so the `rand::Rng` extension methods work on it
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::XorShift32;
//!
//! let mut rng = XorShift32::new(12345);
//!
//! // Uniform draw in the open interval (0, 1)
//! let u = rng.uniform();
//! assert!(u > 0.0 && u < 1.0);
//!
//! // Antithetic pair of standard normals
//! let (z, z_anti) = rng.normal_pair();
//! assert_eq!(z, -z_anti);
//! ```

mod xorshift;

pub use xorshift::{XorShift32, DEFAULT_SEED};
