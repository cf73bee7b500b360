//! Performance statistics of an equity curve.

use pricer_core::math::stats::{mean, population_variance};
use serde::{Deserialize, Serialize};

/// Trading days per year used to annualise daily statistics.
pub const ANNUALISATION_DAYS: f64 = 252.0;

/// Calendar days per year used for CAGR.
pub const CALENDAR_DAYS_PER_YEAR: f64 = 365.0;

/// Summary statistics of a backtest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Compound annual growth rate over the elapsed calendar time.
    pub cagr: f64,
    /// Annualised Sharpe ratio against the configured risk-free rate.
    pub sharpe: f64,
    /// Annualised volatility of bar log returns.
    pub vol: f64,
    /// Largest peak-to-trough decline, as a fraction of the peak.
    pub maxdd: f64,
    /// Fraction of completed round trips that made money.
    pub win_rate: f64,
    /// Number of fills (buys plus sells).
    pub n_trades: usize,
    /// `equity_last / equity_first - 1`.
    pub total_return: f64,
}

/// Curve statistics for `equity` spanning `elapsed_days` calendar days.
///
/// Trade statistics (`win_rate`, `n_trades`) are left at zero for the engine
/// to fill in. Volatility uses the population variance of log returns;
/// Sharpe is zero when volatility is zero, and CAGR is zero when no time
/// has elapsed.
///
/// # Examples
///
/// ```
/// use pricer_backtest::metrics::compute;
///
/// let m = compute(&[1.0, 1.25, 1.0, 1.2], 365.0, 0.0);
/// assert!((m.total_return - 0.2).abs() < 1e-12);
/// assert!((m.cagr - 0.2).abs() < 1e-12);
/// assert!((m.maxdd - 0.2).abs() < 1e-12);
/// ```
pub fn compute(equity: &[f64], elapsed_days: f64, risk_free: f64) -> Metrics {
    let (first, last) = match (equity.first(), equity.last()) {
        (Some(&f), Some(&l)) => (f, l),
        _ => return Metrics::default(),
    };
    let growth = last / first;

    let log_returns: Vec<f64> = equity.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    let ann_mean = ANNUALISATION_DAYS * mean(&log_returns);
    let vol = ANNUALISATION_DAYS.sqrt() * population_variance(&log_returns).sqrt();
    let sharpe = if vol > 0.0 {
        (ann_mean - risk_free) / vol
    } else {
        0.0
    };

    let years = elapsed_days / CALENDAR_DAYS_PER_YEAR;
    let cagr = if years > 0.0 {
        growth.powf(1.0 / years) - 1.0
    } else {
        0.0
    };

    Metrics {
        cagr,
        sharpe,
        vol,
        maxdd: max_drawdown(equity),
        total_return: growth - 1.0,
        ..Metrics::default()
    }
}

/// Largest relative decline from a running peak.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst: f64 = 0.0;
    for &e in equity {
        peak = peak.max(e);
        if peak > 0.0 {
            worst = worst.max((peak - e) / peak);
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_curve() {
        let m = compute(&[1.0; 10], 9.0, 0.02);
        assert_eq!(m.vol, 0.0);
        assert_eq!(m.sharpe, 0.0);
        assert_eq!(m.maxdd, 0.0);
        assert_eq!(m.total_return, 0.0);
        assert_relative_eq!(m.cagr, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_empty_and_single_point() {
        assert_eq!(compute(&[], 10.0, 0.0), Metrics::default());
        let m = compute(&[1.0], 0.0, 0.0);
        assert_eq!(m.cagr, 0.0);
        assert_eq!(m.vol, 0.0);
    }

    #[test]
    fn test_vol_and_sharpe_use_population_moments() {
        let equity: [f64; 4] = [1.0, 1.01, 1.0, 1.02];
        let r: Vec<f64> = equity.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
        let m_r = r.iter().sum::<f64>() / 3.0;
        let var = r.iter().map(|x| (x - m_r).powi(2)).sum::<f64>() / 3.0;

        let m = compute(&equity, 3.0, 0.01);
        assert_relative_eq!(m.vol, (252.0 * var).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(m.sharpe, (252.0 * m_r - 0.01) / m.vol, epsilon = 1e-12);
    }

    #[test]
    fn test_cagr_over_two_years() {
        let m = compute(&[1.0, 1.21], 730.0, 0.0);
        assert_relative_eq!(m.cagr, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_max_drawdown_takes_deepest_trough() {
        assert_relative_eq!(max_drawdown(&[1.0, 2.0, 1.5, 3.0, 1.2, 2.5]), 0.6);
        assert_eq!(max_drawdown(&[1.0, 1.1, 1.2]), 0.0);
    }
}
