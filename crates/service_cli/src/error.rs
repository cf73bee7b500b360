//! Error types for the quantcore CLI.

use pricer_backtest::BacktestError;
use pricer_core::types::PricingError;
use pricer_models::calibration::CalibrationError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file or environment problem
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rejected Monte Carlo settings
    #[error("Monte Carlo error: {0}")]
    MonteCarlo(#[from] pricer_pricing::mc::ConfigError),

    /// Closed-form pricing failure
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// SABR calibration failure
    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    /// Series loading or backtest failure
    #[error("Backtest error: {0}")]
    Backtest(#[from] BacktestError),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Argument combination the command cannot use
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
