//! Shared error types.
//!
//! Numerical degeneracies (zero volatility, expired options, short price
//! series) are handled where they occur and never reach these types; only
//! violated preconditions do.

use thiserror::Error;

/// Failures a pricer surfaces to its caller.
///
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(err.to_string(), "Invalid input: Negative spot price");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Market data or parameters outside the model's domain
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A computation produced a non-finite value
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// The model cannot reproduce the requested quantity
    #[error("Model failure: {0}")]
    ModelFailure(String),
}

/// Root-finding errors.
///
/// Running out of iterations is deliberately absent: the solver returns its
/// best estimate instead.
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::NoBracket { a: 1.0, b: 2.0 };
/// assert!(format!("{}", err).contains("same sign"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::NoBracket { .. } => PricingError::InvalidInput(err.to_string()),
            SolverError::NumericalInstability(msg) => PricingError::NumericalInstability(msg),
        }
    }
}
