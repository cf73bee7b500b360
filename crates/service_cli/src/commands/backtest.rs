//! Backtest command implementation
//!
//! Loads or generates a daily series and runs the configured strategy.

use std::path::PathBuf;

use pricer_backtest::{run_backtest, synthetic_gbm_series, BacktestResult, Metrics, RunParams, Series, Trade};
use serde::Serialize;
use tracing::info;

use super::print_json;
use crate::{CliError, Result};

/// Three years of daily bars.
pub const DEFAULT_SYNTHETIC_BARS: usize = 756;

/// Drift of the synthetic series.
pub const SYNTHETIC_MU: f64 = 0.08;

/// Volatility of the synthetic series.
pub const SYNTHETIC_SIGMA: f64 = 0.2;

/// Where the bars come from
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// OHLC CSV file
    Csv(PathBuf),
    /// Seeded GBM series starting at 100
    Synthetic {
        /// Number of bars
        bars: usize,
        /// Generator seed
        seed: u32,
    },
}

impl Source {
    /// Load or generate the series.
    pub fn load(&self) -> Result<Series> {
        match self {
            Source::Csv(path) => {
                if !path.exists() {
                    return Err(CliError::FileNotFound(path.display().to_string()));
                }
                Ok(Series::from_csv_path(path)?)
            }
            Source::Synthetic { bars, seed } => Ok(synthetic_gbm_series(
                *bars,
                100.0,
                SYNTHETIC_MU,
                SYNTHETIC_SIGMA,
                *seed,
            )?),
        }
    }
}

/// Backtest output without the equity curve
#[derive(Debug, Serialize)]
pub struct BacktestSummary<'a> {
    /// Final normalised equity
    pub final_equity: f64,
    /// Summary statistics
    pub metrics: &'a Metrics,
    /// Fills
    pub trades: &'a [Trade],
}

impl<'a> From<&'a BacktestResult> for BacktestSummary<'a> {
    fn from(result: &'a BacktestResult) -> Self {
        Self {
            final_equity: result.final_equity(),
            metrics: &result.metrics,
            trades: &result.trades,
        }
    }
}

/// Run the backtest command
pub fn run(source: &Source, params: &RunParams, summary: bool) -> Result<()> {
    let series = source.load()?;
    info!(bars = series.len(), ?source, "Series ready");

    let result = run_backtest(&series, params)?;
    if summary {
        print_json(&BacktestSummary::from(&result))
    } else {
        print_json(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_synthetic_source() {
        let series = Source::Synthetic { bars: 30, seed: 4 }.load().unwrap();
        assert_eq!(series.len(), 30);
        assert_eq!(series.bars()[0].close, 100.0);
    }

    #[test]
    fn test_csv_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,open,high,low,close").unwrap();
        for d in 1..=9 {
            writeln!(file, "2024-03-0{},10,10,10,10", d).unwrap();
        }
        let series = Source::Csv(file.path().to_path_buf()).load().unwrap();
        assert_eq!(series.len(), 9);
    }

    #[test]
    fn test_missing_csv() {
        let source = Source::Csv(PathBuf::from("/no/such/bars.csv"));
        assert!(matches!(source.load(), Err(CliError::FileNotFound(_))));
    }

    #[test]
    fn test_summary_drops_equity_curve() {
        let series = Source::Synthetic { bars: 200, seed: 8 }.load().unwrap();
        let result = run_backtest(&series, &RunParams::default()).unwrap();
        let json = serde_json::to_value(BacktestSummary::from(&result)).unwrap();

        assert!(json.get("equity").is_none());
        assert!(json["final_equity"].is_number());
        assert_eq!(json["metrics"]["n_trades"], result.trades.len());
    }
}
