//! Calibrate command implementation
//!
//! Fits SABR (alpha, rho, nu) at fixed beta to a JSON file of implied-vol
//! quotes for one forward.

use std::path::Path;

use pricer_models::calibration::{SabrCalibration, SabrCalibrationConfig, SabrCalibrator, SabrPoint};
use pricer_models::models::sabr::{hagan_iv, SabrParams};
use serde::Serialize;
use tracing::info;

use super::print_json;
use crate::{CliError, Result};

/// Inputs of one calibration run
#[derive(Debug, Clone, Copy)]
pub struct CalibrateRequest<'a> {
    /// Forward of the slice
    pub forward: f64,
    /// Quote file
    pub points: &'a Path,
    /// Fixed beta
    pub beta: f64,
    /// Coordinate-descent rounds
    pub rounds: usize,
    /// Initial alpha, derived from the quotes when absent
    pub alpha: Option<f64>,
    /// Initial rho
    pub rho: f64,
    /// Initial nu
    pub nu: f64,
}

/// Fitted vol next to the quote it reproduces
#[derive(Debug, Serialize)]
pub struct FittedPoint {
    /// Strike
    pub strike: f64,
    /// Maturity in years
    pub maturity: f64,
    /// Quoted implied vol
    pub market_iv: f64,
    /// SABR implied vol at the fitted parameters
    pub model_iv: f64,
}

/// Output of `quantcore calibrate`
#[derive(Debug, Serialize)]
pub struct CalibrateReport {
    /// Forward of the slice
    pub forward: f64,
    /// Fitted parameters, RMSE and rounds
    pub calibration: SabrCalibration,
    /// Per-quote fit
    pub fit: Vec<FittedPoint>,
}

/// Initial alpha from the quote nearest the money: `σ_ATM · F^(1-β)`.
pub fn initial_alpha(forward: f64, points: &[SabrPoint], beta: f64) -> Option<f64> {
    let atm = points.iter().min_by(|a, b| {
        (a.strike - forward)
            .abs()
            .total_cmp(&(b.strike - forward).abs())
    })?;
    Some(atm.iv * forward.powf(1.0 - beta))
}

/// Calibrate `points` and pair each quote with its fitted vol
pub fn report(
    forward: f64,
    points: &[SabrPoint],
    beta: f64,
    rounds: usize,
    initial: &SabrParams,
) -> Result<CalibrateReport> {
    let calibrator = SabrCalibrator::new(SabrCalibrationConfig::default().with_rounds(rounds));
    let calibration = calibrator.calibrate(forward, points, beta, initial)?;

    let fit = points
        .iter()
        .map(|p| FittedPoint {
            strike: p.strike,
            maturity: p.maturity,
            market_iv: p.iv,
            model_iv: hagan_iv(forward, p.strike, p.maturity, &calibration.params),
        })
        .collect();

    Ok(CalibrateReport {
        forward,
        calibration,
        fit,
    })
}

/// Run the calibrate command
pub fn run(request: &CalibrateRequest<'_>) -> Result<()> {
    if !request.points.exists() {
        return Err(CliError::FileNotFound(request.points.display().to_string()));
    }
    let content = std::fs::read_to_string(request.points)?;
    let points: Vec<SabrPoint> = serde_json::from_str(&content)?;
    info!(
        forward = request.forward,
        quotes = points.len(),
        beta = request.beta,
        rounds = request.rounds,
        "Starting SABR calibration"
    );

    let alpha = match request.alpha {
        Some(alpha) => alpha,
        None => initial_alpha(request.forward, &points, request.beta)
            .ok_or_else(|| CliError::invalid_argument("quote file is empty"))?,
    };
    let initial = SabrParams {
        alpha,
        beta: request.beta,
        rho: request.rho,
        nu: request.nu,
    };

    let report = report(request.forward, &points, request.beta, request.rounds, &initial)?;
    info!(
        rmse = report.calibration.rmse,
        alpha = report.calibration.params.alpha,
        rho = report.calibration.params.rho,
        nu = report.calibration.params.nu,
        "Calibration complete"
    );
    print_json(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    fn quotes(forward: f64, truth: &SabrParams) -> Vec<SabrPoint> {
        [70.0, 80.0, 90.0, 100.0, 110.0, 120.0, 130.0]
            .iter()
            .map(|&k| SabrPoint::new(k, 1.0, hagan_iv(forward, k, 1.0, truth)))
            .collect()
    }

    #[test]
    fn test_initial_alpha_uses_nearest_quote() {
        let points = vec![
            SabrPoint::new(90.0, 1.0, 0.25),
            SabrPoint::new(101.0, 1.0, 0.2),
            SabrPoint::new(120.0, 1.0, 0.18),
        ];
        assert_relative_eq!(initial_alpha(100.0, &points, 0.5).unwrap(), 2.0, epsilon = 1e-12);
        assert_eq!(initial_alpha(100.0, &[], 0.5), None);
    }

    #[test]
    fn test_report_fit_matches_quotes() {
        let truth = SabrParams::new(2.0, 0.5, -0.3, 0.4).unwrap();
        let points = quotes(100.0, &truth);
        let alpha = initial_alpha(100.0, &points, 0.5).unwrap();
        let initial = SabrParams::new(alpha, 0.5, 0.0, 0.5).unwrap();

        let report = report(100.0, &points, 0.5, 25, &initial).unwrap();
        assert_eq!(report.fit.len(), points.len());
        for p in &report.fit {
            assert!((p.model_iv - p.market_iv).abs() < 5e-3);
        }
    }

    #[test]
    fn test_run_reads_json_quotes() {
        let truth = SabrParams::new(2.0, 0.5, -0.3, 0.4).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&quotes(100.0, &truth)).unwrap()).unwrap();

        let request = CalibrateRequest {
            forward: 100.0,
            points: file.path(),
            beta: 0.5,
            rounds: 5,
            alpha: None,
            rho: 0.0,
            nu: 0.5,
        };
        assert!(run(&request).is_ok());
    }

    #[test]
    fn test_missing_quote_file() {
        let request = CalibrateRequest {
            forward: 100.0,
            points: Path::new("/no/such/quotes.json"),
            beta: 0.5,
            rounds: 5,
            alpha: None,
            rho: 0.0,
            nu: 0.5,
        };
        assert!(matches!(run(&request), Err(CliError::FileNotFound(_))));
    }
}
