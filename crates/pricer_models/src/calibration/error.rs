//! Calibration error types.
//!
//! Calibration itself cannot fail once its inputs are accepted: it runs a
//! fixed number of rounds and reports the residual. These errors cover
//! inputs that make the objective meaningless.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::models::sabr::SabrError;

/// Calibration error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Not enough market quotes to fit against.
    #[error("Insufficient market data (required: {required}, provided: {provided})")]
    InsufficientData {
        /// Minimum required data points
        required: usize,
        /// Actual data points provided
        provided: usize,
    },

    /// Forward must be positive and finite.
    #[error("Invalid forward: F = {0}")]
    InvalidForward(f64),

    /// Fixed beta outside [0, 1].
    #[error("Invalid fixed beta: {0} (must be in [0, 1])")]
    InvalidBeta(f64),

    /// Starting point outside the parameter domain.
    #[error("Invalid initial guess: {0}")]
    InvalidInitialGuess(#[from] SabrError),

    /// A market quote that cannot enter the objective.
    #[error("Invalid market data: {message}")]
    InvalidMarketData {
        /// Description of the validation failure
        message: String,
    },
}

impl CalibrationError {
    /// Create an insufficient data error.
    pub fn insufficient_data(required: usize, provided: usize) -> Self {
        CalibrationError::InsufficientData { required, provided }
    }

    /// Create an invalid market data error.
    pub fn invalid_market_data(message: impl Into<String>) -> Self {
        CalibrationError::InvalidMarketData {
            message: message.into(),
        }
    }
}

impl From<CalibrationError> for PricingError {
    fn from(err: CalibrationError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            CalibrationError::insufficient_data(1, 0).to_string(),
            "Insufficient market data (required: 1, provided: 0)"
        );
        assert_eq!(
            CalibrationError::InvalidBeta(1.5).to_string(),
            "Invalid fixed beta: 1.5 (must be in [0, 1])"
        );
        assert!(CalibrationError::invalid_market_data("strike 0")
            .to_string()
            .contains("strike 0"));
    }

    #[test]
    fn test_from_sabr_error() {
        let err: CalibrationError = SabrError::InvalidRho(1.2).into();
        assert!(matches!(err, CalibrationError::InvalidInitialGuess(_)));
        assert!(err.to_string().contains("rho"));
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = CalibrationError::InvalidForward(-1.0).into();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }
}
