//! Error types for the Monte Carlo engine.
//!
//! Only configuration can fail; a validated run always produces an estimate.

use std::fmt;

use super::{MAX_PATHS, MAX_STEPS};

/// Rejected simulation settings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    /// `paths` is zero or above [`MAX_PATHS`]
    InvalidPathCount(usize),
    /// `steps` is zero or above [`MAX_STEPS`]
    InvalidStepCount(usize),
    /// Non-finite or out-of-domain GBM input
    InvalidParameter {
        /// Field name
        name: &'static str,
        /// What is wrong with it
        value: String,
    },
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPathCount(n) => {
                write!(f, "Invalid path count {n}: expected 1..={MAX_PATHS}")
            }
            Self::InvalidStepCount(n) => {
                write!(f, "Invalid step count {n}: expected 1..={MAX_STEPS}")
            }
            Self::InvalidParameter { name, value } => write!(f, "{name} {value}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPathCount(0);
        assert!(err.to_string().contains("Invalid path count 0"));

        let err = ConfigError::InvalidStepCount(20_000);
        assert_eq!(
            err.to_string(),
            format!("Invalid step count 20000: expected 1..={}", MAX_STEPS)
        );

        let err = ConfigError::invalid_parameter("sigma", "must be non-negative, got -0.1");
        assert_eq!(err.to_string(), "sigma must be non-negative, got -0.1");
    }
}
