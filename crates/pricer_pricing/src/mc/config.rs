//! Monte Carlo simulation options.

use super::error::ConfigError;
use crate::rng::DEFAULT_SEED;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Monte Carlo run options.
///
/// The engine itself only reads `paths` and `seed`. `steps` and
/// `antithetic` are read by the product pricers that build paths.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::McOptions;
///
/// let options = McOptions::builder()
///     .paths(10_000)
///     .steps(252)
///     .seed(42)
///     .antithetic(true)
///     .build()
///     .expect("valid options");
///
/// assert_eq!(options.paths, 10_000);
/// assert!(options.antithetic);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct McOptions {
    /// Number of independent trials.
    pub paths: usize,
    /// Time steps per simulated path.
    pub steps: usize,
    /// Whether product pricers should average mirrored path pairs.
    pub antithetic: bool,
    /// Generator seed (0 behaves like 1).
    pub seed: u32,
}

impl Default for McOptions {
    fn default() -> Self {
        Self {
            paths: 10_000,
            steps: 100,
            antithetic: false,
            seed: DEFAULT_SEED,
        }
    }
}

impl McOptions {
    /// Creates a new options builder starting from the defaults.
    #[inline]
    pub fn builder() -> McOptionsBuilder {
        McOptionsBuilder::default()
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `paths` is 0 or greater than 10,000,000
    /// - `steps` is 0 or greater than 10,000
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths == 0 || self.paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.paths));
        }
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.steps));
        }
        Ok(())
    }
}

/// Builder for [`McOptions`] with validation at build time.
#[derive(Clone, Debug, Default)]
pub struct McOptionsBuilder {
    options: McOptions,
}

impl McOptionsBuilder {
    /// Sets the number of trials, in [1, 10_000_000].
    #[inline]
    pub fn paths(mut self, paths: usize) -> Self {
        self.options.paths = paths;
        self
    }

    /// Sets the number of time steps per path, in [1, 10_000].
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.options.steps = steps;
        self
    }

    /// Enables or disables antithetic pairing.
    #[inline]
    pub fn antithetic(mut self, antithetic: bool) -> Self {
        self.options.antithetic = antithetic;
        self
    }

    /// Sets the generator seed.
    #[inline]
    pub fn seed(mut self, seed: u32) -> Self {
        self.options.seed = seed;
        self
    }

    /// Builds and validates the options.
    pub fn build(self) -> Result<McOptions, ConfigError> {
        self.options.validate()?;
        Ok(self.options)
    }
}
