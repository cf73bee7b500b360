//! Error types for series loading and backtest configuration.
//!
//! Running a backtest on a valid series never fails; only malformed input
//! data and invalid run parameters are reported here.

use thiserror::Error;

/// Backtest errors.
///
/// # Examples
///
/// ```
/// use pricer_backtest::BacktestError;
///
/// let err = BacktestError::NonMonotonicTimestamps { index: 3 };
/// assert!(err.to_string().contains("bar 3"));
/// ```
#[derive(Debug, Error)]
pub enum BacktestError {
    /// Run parameters outside their valid domain.
    #[error("Invalid backtest parameters: {0}")]
    InvalidParams(String),

    /// Bar timestamp not strictly after its predecessor.
    #[error("Timestamps must be strictly increasing: bar {index} is not after its predecessor")]
    NonMonotonicTimestamps {
        /// Index of the offending bar.
        index: usize,
    },

    /// Bar with a non-finite or non-positive price.
    #[error("Bar {index} has a non-finite or non-positive price")]
    NonFinitePrice {
        /// Index of the offending bar.
        index: usize,
    },

    /// Malformed CSV record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failure reading the input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Field that could not be parsed.
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number in the source file.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

impl BacktestError {
    /// Shorthand for [`BacktestError::InvalidParams`].
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }
}
