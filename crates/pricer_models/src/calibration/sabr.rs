//! SABR smile calibration with a fixed beta.
//!
//! ## Calibration Approach
//!
//! Alpha, rho and nu are fitted to market implied volatilities by
//! minimising the sum of squared differences between Hagan and market
//! vols. The search is coordinate-wise: each round optimises alpha, then
//! rho, then nu over a bracket around the current value. Each 1-D problem
//! is solved by running Brent's method on the central-difference
//! derivative of the objective; when the derivative does not change sign
//! over the bracket the better endpoint is taken.
//!
//! A move is only accepted if it does not increase the objective, so the
//! residual is non-increasing across rounds. The round count is fixed and
//! there is no residual-based stopping rule; the search may settle in a
//! local minimum.
//!
//! ## Example
//!
//! ```
//! use pricer_models::calibration::{calibrate_sabr, SabrPoint};
//! use pricer_models::models::sabr::{hagan_iv, SabrParams};
//!
//! let truth = SabrParams::new(0.3, 1.0, -0.2, 0.5).unwrap();
//! let points: Vec<SabrPoint> = [80.0, 90.0, 100.0, 110.0, 120.0]
//!     .iter()
//!     .map(|&k| SabrPoint::new(k, 1.0, hagan_iv(100.0, k, 1.0, &truth)))
//!     .collect();
//!
//! let guess = SabrParams::new(0.25, 1.0, 0.0, 0.3).unwrap();
//! let fit = calibrate_sabr(100.0, &points, 1.0, &guess).unwrap();
//! assert!(fit.rmse < 5e-3);
//! ```

use pricer_core::math::solvers::{BrentSolver, SolverConfig};
use tracing::debug;

use super::error::CalibrationError;
use crate::models::sabr::{hagan_iv, SabrParams};

/// Smallest alpha and nu the search will evaluate.
const MIN_POSITIVE: f64 = 1e-4;

/// Largest |rho| the search will evaluate.
const MAX_ABS_RHO: f64 = 0.999;

/// Half-width of the rho bracket.
const RHO_STEP: f64 = 0.5;

/// One market implied volatility quote.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SabrPoint {
    /// Strike (positive)
    pub strike: f64,
    /// Time to expiry in years
    pub maturity: f64,
    /// Market implied volatility
    pub iv: f64,
}

impl SabrPoint {
    /// Create a new quote.
    pub fn new(strike: f64, maturity: f64, iv: f64) -> Self {
        Self {
            strike,
            maturity,
            iv,
        }
    }
}

/// Settings for [`SabrCalibrator`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SabrCalibrationConfig {
    /// Number of full alpha/rho/nu passes
    pub rounds: usize,
    /// Root finder settings for the 1-D searches (`SolverConfig::fast()`
    /// by default)
    pub solver: SolverConfig<f64>,
}

impl Default for SabrCalibrationConfig {
    fn default() -> Self {
        Self {
            rounds: 25,
            solver: SolverConfig::fast(),
        }
    }
}

impl SabrCalibrationConfig {
    /// Overrides the number of rounds.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }
}

/// Calibrated parameters and fit diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SabrCalibration {
    /// Fitted parameters (beta as supplied)
    pub params: SabrParams,
    /// Root mean squared implied volatility error
    pub rmse: f64,
    /// Rounds performed
    pub rounds: usize,
}

#[derive(Clone, Copy, Debug)]
enum Coordinate {
    Alpha,
    Rho,
    Nu,
}

impl Coordinate {
    const ALL: [Coordinate; 3] = [Coordinate::Alpha, Coordinate::Rho, Coordinate::Nu];

    fn value(self, p: &SabrParams) -> f64 {
        match self {
            Coordinate::Alpha => p.alpha,
            Coordinate::Rho => p.rho,
            Coordinate::Nu => p.nu,
        }
    }

    /// Copy of `p` with this coordinate set to `x`, clamped to its domain.
    fn with(self, p: &SabrParams, x: f64) -> SabrParams {
        let mut out = *p;
        match self {
            Coordinate::Alpha => out.alpha = x.max(MIN_POSITIVE),
            Coordinate::Rho => out.rho = x.clamp(-MAX_ABS_RHO, MAX_ABS_RHO),
            Coordinate::Nu => out.nu = x.max(MIN_POSITIVE),
        }
        out
    }

    fn bracket(self, p: &SabrParams) -> (f64, f64) {
        match self {
            Coordinate::Alpha => ((0.5 * p.alpha).max(MIN_POSITIVE), 2.0 * p.alpha),
            Coordinate::Rho => (
                (p.rho - RHO_STEP).max(-MAX_ABS_RHO),
                (p.rho + RHO_STEP).min(MAX_ABS_RHO),
            ),
            Coordinate::Nu => ((0.5 * p.nu).max(MIN_POSITIVE), 2.0 * p.nu),
        }
    }
}

/// Fixed-beta SABR calibrator.
#[derive(Clone, Debug, Default)]
pub struct SabrCalibrator {
    config: SabrCalibrationConfig,
}

impl SabrCalibrator {
    /// Create a calibrator with the given settings.
    pub fn new(config: SabrCalibrationConfig) -> Self {
        Self { config }
    }

    /// Current settings.
    pub fn config(&self) -> &SabrCalibrationConfig {
        &self.config
    }

    /// Fits alpha, rho and nu to `points` on forward `forward` with `beta`
    /// held fixed, starting from `initial` (whose beta is ignored).
    ///
    /// # Errors
    /// - `InvalidForward` for a non-positive or non-finite forward
    /// - `InvalidBeta` for a beta outside [0, 1]
    /// - `InsufficientData` when `points` is empty
    /// - `InvalidMarketData` for a non-positive strike, negative maturity or
    ///   non-finite vol
    /// - `InvalidInitialGuess` when `initial` is outside the SABR domain
    pub fn calibrate(
        &self,
        forward: f64,
        points: &[SabrPoint],
        beta: f64,
        initial: &SabrParams,
    ) -> Result<SabrCalibration, CalibrationError> {
        validate_inputs(forward, points, beta)?;
        SabrParams::new(initial.alpha, beta, initial.rho, initial.nu)?;

        let sse = |p: &SabrParams| -> f64 {
            points
                .iter()
                .map(|pt| {
                    let diff = hagan_iv(forward, pt.strike, pt.maturity, p) - pt.iv;
                    diff * diff
                })
                .sum()
        };

        let mut params = Coordinate::ALL
            .iter()
            .fold(SabrParams { beta, ..*initial }, |p, c| {
                c.with(&p, c.value(&p))
            });
        let mut current = sse(&params);

        let solver = BrentSolver::new(self.config.solver);
        for round in 0..self.config.rounds {
            for coord in Coordinate::ALL {
                let (lo, hi) = coord.bracket(&params);
                let base = params;
                let objective = |x: f64| sse(&coord.with(&base, x));

                let x = line_search(&objective, lo, hi, &solver);
                let candidate = objective(x);
                if candidate <= current {
                    params = coord.with(&base, x);
                    current = candidate;
                }
            }
            debug!(
                round = round + 1,
                sse = current,
                alpha = params.alpha,
                rho = params.rho,
                nu = params.nu,
                "SABR calibration round"
            );
        }

        let rmse = (current / points.len() as f64).sqrt();
        debug!(rmse, rounds = self.config.rounds, "SABR calibration finished");

        Ok(SabrCalibration {
            params,
            rmse,
            rounds: self.config.rounds,
        })
    }
}

/// Calibrates with the default settings (25 rounds).
pub fn calibrate_sabr(
    forward: f64,
    points: &[SabrPoint],
    beta: f64,
    initial: &SabrParams,
) -> Result<SabrCalibration, CalibrationError> {
    SabrCalibrator::default().calibrate(forward, points, beta, initial)
}

fn validate_inputs(forward: f64, points: &[SabrPoint], beta: f64) -> Result<(), CalibrationError> {
    if !(forward > 0.0 && forward.is_finite()) {
        return Err(CalibrationError::InvalidForward(forward));
    }
    if !(0.0..=1.0).contains(&beta) {
        return Err(CalibrationError::InvalidBeta(beta));
    }
    if points.is_empty() {
        return Err(CalibrationError::insufficient_data(1, 0));
    }
    for (i, pt) in points.iter().enumerate() {
        if !(pt.strike > 0.0 && pt.strike.is_finite()) {
            return Err(CalibrationError::invalid_market_data(format!(
                "point {}: strike {} must be positive",
                i, pt.strike
            )));
        }
        if !(pt.maturity >= 0.0 && pt.maturity.is_finite()) {
            return Err(CalibrationError::invalid_market_data(format!(
                "point {}: maturity {} must be non-negative",
                i, pt.maturity
            )));
        }
        if !pt.iv.is_finite() {
            return Err(CalibrationError::invalid_market_data(format!(
                "point {}: implied vol {} is not finite",
                i, pt.iv
            )));
        }
    }
    Ok(())
}

/// Minimiser of `objective` on `[lo, hi]`: a stationary point found by
/// Brent on the central-difference slope, or the better endpoint.
fn line_search<F>(objective: &F, lo: f64, hi: f64, solver: &BrentSolver<f64>) -> f64
where
    F: Fn(f64) -> f64,
{
    let slope = |x: f64| {
        let h = 1e-6 * (1.0 + x.abs());
        (objective(x + h) - objective(x - h)) / (2.0 * h)
    };

    let best_end = if objective(lo) <= objective(hi) { lo } else { hi };
    match solver.find_root(slope, lo, hi) {
        Ok(x) if objective(x) <= objective(best_end) => x,
        _ => best_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn truth() -> SabrParams {
        SabrParams::new(2.0, 0.5, -0.3, 0.4).unwrap()
    }

    fn smile(params: &SabrParams) -> Vec<SabrPoint> {
        (0..7)
            .map(|i| {
                let k = 70.0 + 10.0 * i as f64;
                SabrPoint::new(k, 1.0, hagan_iv(100.0, k, 1.0, params))
            })
            .collect()
    }

    #[test]
    fn test_starting_at_truth_stays_there() {
        let p = truth();
        let fit = calibrate_sabr(100.0, &smile(&p), 0.5, &p).unwrap();
        assert!(fit.rmse < 1e-8);
        assert_abs_diff_eq!(fit.params.alpha, p.alpha, epsilon = 1e-6);
        assert_eq!(fit.rounds, 25);
    }

    #[test]
    fn test_beta_is_held_fixed() {
        let guess = SabrParams::new(1.5, 0.9, 0.0, 0.3).unwrap();
        let fit = calibrate_sabr(100.0, &smile(&truth()), 0.5, &guess).unwrap();
        assert_eq!(fit.params.beta, 0.5);
    }

    #[test]
    fn test_fit_never_worse_than_guess() {
        let guess = SabrParams::new(1.2, 0.5, 0.2, 0.9).unwrap();
        let points = smile(&truth());
        let rmse_of = |p: &SabrParams| {
            (points
                .iter()
                .map(|pt| (hagan_iv(100.0, pt.strike, pt.maturity, p) - pt.iv).powi(2))
                .sum::<f64>()
                / points.len() as f64)
                .sqrt()
        };
        let start = rmse_of(&guess);

        let calibrator = SabrCalibrator::new(SabrCalibrationConfig::default().with_rounds(3));
        let short = calibrator.calibrate(100.0, &points, 0.5, &guess).unwrap();
        let long = calibrate_sabr(100.0, &points, 0.5, &guess).unwrap();

        assert!(short.rmse <= start);
        assert!(long.rmse <= short.rmse);
        assert_abs_diff_eq!(long.rmse, rmse_of(&long.params), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_rounds_returns_clamped_guess() {
        let guess = SabrParams {
            alpha: 2.0,
            beta: 0.5,
            rho: 0.9995,
            nu: 0.4,
        };
        let calibrator = SabrCalibrator::new(SabrCalibrationConfig::default().with_rounds(0));
        let fit = calibrator
            .calibrate(100.0, &smile(&truth()), 0.5, &guess)
            .unwrap();
        assert_eq!(fit.params.rho, MAX_ABS_RHO);
        assert_eq!(fit.rounds, 0);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let p = truth();
        let points = smile(&p);
        assert!(matches!(
            calibrate_sabr(0.0, &points, 0.5, &p),
            Err(CalibrationError::InvalidForward(_))
        ));
        assert!(matches!(
            calibrate_sabr(100.0, &points, 1.2, &p),
            Err(CalibrationError::InvalidBeta(_))
        ));
        assert!(matches!(
            calibrate_sabr(100.0, &[], 0.5, &p),
            Err(CalibrationError::InsufficientData { .. })
        ));
        assert!(matches!(
            calibrate_sabr(100.0, &[SabrPoint::new(-1.0, 1.0, 0.2)], 0.5, &p),
            Err(CalibrationError::InvalidMarketData { .. })
        ));
        let bad_guess = SabrParams { alpha: -1.0, ..p };
        assert!(matches!(
            calibrate_sabr(100.0, &points, 0.5, &bad_guess),
            Err(CalibrationError::InvalidInitialGuess(_))
        ));
    }

    #[test]
    fn test_line_search_on_parabola() {
        let solver = BrentSolver::with_defaults();
        let x = line_search(&|x: f64| (x - 0.7).powi(2), 0.0, 2.0, &solver);
        assert_abs_diff_eq!(x, 0.7, epsilon = 1e-8);

        // Monotone objective: no stationary point, lower endpoint wins.
        let x = line_search(&|x: f64| x, 1.0, 2.0, &solver);
        assert_eq!(x, 1.0);
    }
}
