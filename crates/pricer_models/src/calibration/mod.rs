//! Model calibration.
//!
//! - [`SabrCalibrator`]: fixed-beta SABR smile fit by coordinate search
//! - [`CalibrationError`]: rejected calibration inputs
//!
//! # Calibration flow
//!
//! ```text
//!  SabrPoint[] ──► validate ──► clamp guess ──► rounds × (alpha, rho, nu)
//!                                                   │
//!                                       Brent on ∂SSE/∂θ per coordinate
//!                                                   │
//!                                                   ▼
//!                                   SabrCalibration { params, rmse, rounds }
//! ```

mod error;
pub mod sabr;

pub use error::CalibrationError;
pub use sabr::{
    calibrate_sabr, SabrCalibration, SabrCalibrationConfig, SabrCalibrator, SabrPoint,
};
