//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;
use tracing::warn;

/// Outcome of a bracketed root search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootResult<T: Float> {
    /// Root estimate.
    pub root: T,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the tolerance was met within the iteration budget.
    pub converged: bool,
}

/// Bracketed, derivative-free root finder.
///
/// Holds a contrapoint `c` with `f(b)·f(c) < 0` so every iterate stays
/// inside the sign change. A step is an inverse quadratic fit through
/// `a, b, c` (or a secant when `a == c`), replaced by bisection when the fit
/// lands outside the bracket or the previous step shrank too little.
///
/// Running out of `max_iterations` is not an error. [`BrentSolver::solve`]
/// reports `converged == false` with the point of smallest `|f|`, and
/// [`BrentSolver::find_root`] returns that point, so callers must tolerate
/// inexact roots.
///
/// ```
/// use pricer_core::math::solvers::BrentSolver;
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let root = BrentSolver::with_defaults().find_root(f, 1.0, 2.0).unwrap();
/// assert!(f(root).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Solver with explicit stopping rules.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Solver with `SolverConfig::default()`.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Root of `f` in `[a, b]`, or the best estimate when the budget runs
    /// out. Fails with [`SolverError::NoBracket`] when `f(a)` and `f(b)`
    /// share a sign or either is NaN.
    ///
    /// ```
    /// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
    ///
    /// let solver = BrentSolver::new(SolverConfig::default());
    /// let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
    /// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
    ///
    /// assert!(solver.find_root(|x: f64| x * x + 1.0, -1.0, 1.0).is_err());
    /// ```
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        self.solve(f, a, b).map(|result| result.root)
    }

    /// As [`find_root`](Self::find_root), with the iteration count and
    /// convergence flag.
    pub fn solve<F>(&self, f: F, a: T, b: T) -> Result<RootResult<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        let zero = T::zero();
        let one = T::one();
        let half = T::from(0.5).unwrap();
        let two = T::from(2.0).unwrap();
        let three = T::from(3.0).unwrap();

        let mut a = a;
        let mut b = b;
        let mut fa = f(a);
        let mut fb = f(b);

        if fa == zero {
            return Ok(RootResult {
                root: a,
                iterations: 0,
                converged: true,
            });
        }
        if fb == zero {
            return Ok(RootResult {
                root: b,
                iterations: 0,
                converged: true,
            });
        }

        // Also rejects NaN endpoint values
        if !(fa * fb < zero) {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let tol = self.config.tolerance;
        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        for iteration in 1..=self.config.max_iterations {
            // Keep the root between b and c
            if (fb > zero && fc > zero) || (fb < zero && fc < zero) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }

            // b is always the best estimate
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol1 = two * T::epsilon() * b.abs() + half * tol;
            let m = half * (c - b);

            if m.abs() <= tol1 || fb.abs() < tol {
                return Ok(RootResult {
                    root: b,
                    iterations: iteration,
                    converged: true,
                });
            }

            if e.abs() >= tol1 && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (p, q) = if a == c {
                    // Secant step
                    (two * m * s, one - s)
                } else {
                    // Inverse quadratic interpolation
                    let t = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * m * t * (t - r) - (b - a) * (r - one)),
                        (t - one) * (r - one) * (s - one),
                    )
                };
                let (p, q) = if p > zero { (p, -q) } else { (-p, q) };

                let min1 = three * m * q - (tol1 * q).abs();
                let min2 = (e * q).abs();
                if two * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = m;
                    e = d;
                }
            } else {
                d = m;
                e = d;
            }

            a = b;
            fa = fb;

            b = if d.abs() > tol1 {
                b + d
            } else if m > zero {
                b + tol1
            } else {
                b - tol1
            };
            fb = f(b);
        }

        // Best of the points still held
        let mut root = b;
        let mut best = fb.abs();
        for (x, fx) in [(c, fc), (a, fa)] {
            if fx.abs() < best {
                root = x;
                best = fx.abs();
            }
        }

        warn!(
            iterations = self.config.max_iterations,
            residual = best.to_f64().unwrap_or(f64::NAN),
            "Brent solver did not converge; returning best estimate"
        );

        Ok(RootResult {
            root,
            iterations: self.config.max_iterations,
            converged: false,
        })
    }

    /// Stopping rules in use.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
