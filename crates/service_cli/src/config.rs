//! CLI configuration management.
//!
//! Settings come from `quantcore.toml` (or the `--config` path), then from
//! `QUANTCORE_*` environment variables. A missing file means defaults.
//!
//! ```toml
//! log_level = "info"
//!
//! [monte_carlo]
//! paths = 50000
//! steps = 100
//! seed = 42
//! antithetic = true
//!
//! [backtest]
//! fee = 0.0005
//! slippage = 0.0002
//! ema_fast = 12
//! ema_slow = 26
//!
//! [sabr]
//! beta = 0.5
//! rounds = 25
//! ```

use std::path::Path;
use std::str::FromStr;

use pricer_backtest::{RunParams, StrategyKind};
use pricer_pricing::mc::McOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Configuration file error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`CliConfig`]
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Unknown log level name
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Environment variable with an unparsable value
    #[error("Environment variable {name}: cannot parse '{value}'")]
    EnvError {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },

    /// One or more settings out of range
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Log levels accepted in the config file and environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Per-fill and per-round detail
    Debug,
    /// Run summaries
    #[default]
    Info,
    /// Solver and data warnings only
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// `[sabr]` section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SabrSection {
    /// Fixed CEV exponent
    pub beta: f64,
    /// Coordinate-descent rounds
    pub rounds: usize,
}

impl Default for SabrSection {
    fn default() -> Self {
        Self {
            beta: 0.5,
            rounds: 25,
        }
    }
}

/// Full CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Default Monte Carlo settings
    pub monte_carlo: McOptions,
    /// Default backtest parameters
    pub backtest: RunParams,
    /// Default SABR calibration settings
    pub sabr: SabrSection,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from `path`, or defaults when the file does not exist.
    ///
    /// A file that exists but fails to parse is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `QUANTCORE_LOG_LEVEL`, `QUANTCORE_MC_PATHS` and
    /// `QUANTCORE_MC_SEED` overrides from the process environment.
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(level) = lookup("QUANTCORE_LOG_LEVEL") {
            self.log_level = level.parse()?;
        }
        if let Some(paths) = lookup("QUANTCORE_MC_PATHS") {
            self.monte_carlo.paths = parse_env("QUANTCORE_MC_PATHS", paths)?;
        }
        if let Some(seed) = lookup("QUANTCORE_MC_SEED") {
            self.monte_carlo.seed = parse_env("QUANTCORE_MC_SEED", seed)?;
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.monte_carlo.validate() {
            errors.push(format!("[monte_carlo] {}", e));
        }

        // Both strategies are checked so a config stays valid whichever one
        // a command selects.
        for strategy in [StrategyKind::EmaCross, StrategyKind::Rsi] {
            let params = RunParams {
                strategy,
                ..self.backtest
            };
            if let Err(e) = params.validate() {
                let message = format!("[backtest] {}", e);
                if !errors.contains(&message) {
                    errors.push(message);
                }
            }
        }

        if !(0.0..=1.0).contains(&self.sabr.beta) {
            errors.push(format!("[sabr] beta {} must be in [0, 1]", self.sabr.beta));
        }
        if self.sabr.rounds == 0 {
            errors.push("[sabr] rounds must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn parse_env<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError { name, value })
}
