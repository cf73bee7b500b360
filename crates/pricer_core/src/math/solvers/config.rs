//! Stopping rules for the root finder.

use num_traits::Float;

/// Tolerance and iteration budget for [`BrentSolver`](super::BrentSolver).
///
/// Two presets exist: [`Default`] for standalone root finding (`1e-10`,
/// 100 iterations) and [`SolverConfig::fast`] for inner line searches that
/// run many times per calibration round.
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let tight = SolverConfig::<f64>::default().with_tolerance(1e-13);
/// assert_eq!(tight.max_iterations, 100);
/// assert!(tight.tolerance < SolverConfig::<f64>::fast().tolerance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Stop once `|f(x)|` or the bracket width falls below this.
    pub tolerance: T,
    /// Iterations before the best bracketed estimate is returned unconverged.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Build from explicit values.
    ///
    /// # Panics
    ///
    /// If `tolerance` is not strictly positive or `max_iterations` is zero.
    /// Both are programmer errors; neither can come from market data.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// `1e-6` and 50 iterations.
    pub fn fast() -> Self {
        Self {
            tolerance: T::from(1e-6).unwrap(),
            max_iterations: 50,
        }
    }

    /// Same budget, different tolerance.
    pub fn with_tolerance(self, tolerance: T) -> Self {
        Self::new(tolerance, self.max_iterations)
    }

    /// Same tolerance, different budget.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self::new(self.tolerance, max_iterations)
    }
}
