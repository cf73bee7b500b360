//! Long/flat backtest state machine.
//!
//! One position state per bar, FLAT or LONG, starting FLAT. Each bar `i ≥ 1`
//! is processed in a fixed order:
//!
//! 1. Mark to market: if LONG, `equity *= c_i / c_{i-1}`.
//! 2. Evaluate the strategy on indicator values at `i-1` and `i`.
//! 3. Fill at `c_i`: a buy only when FLAT, a sell only when LONG.
//!
//! Marking before filling means a position opened at bar `i` earns nothing
//! from the move into bar `i`.
//!
//! # Costs
//!
//! Buys fill at `c·(1+slippage)` and sells at `c·(1-slippage)`; both pay the
//! proportional `fee` on the traded notional. Equity is normalised to 1 at
//! the first bar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::BacktestError;
use crate::indicators::{ema, rsi};
use crate::metrics::{self, Metrics};
use crate::series::Series;

/// Signal source for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Fast EMA crossing the slow EMA.
    #[default]
    EmaCross,
    /// RSI crossing the buy/sell thresholds.
    Rsi,
}

/// Parameters of a backtest run.
///
/// # Examples
///
/// ```
/// use pricer_backtest::{RunParams, StrategyKind};
///
/// let params = RunParams {
///     strategy: StrategyKind::Rsi,
///     fee: 0.0,
///     ..RunParams::default()
/// };
/// assert!(params.validate().is_ok());
/// assert_eq!(params.rsi_period, 14);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    /// Which indicator drives the signals
    pub strategy: StrategyKind,
    /// Proportional fee per fill
    pub fee: f64,
    /// Proportional slippage per fill
    pub slippage: f64,
    /// Fast EMA period
    pub ema_fast: usize,
    /// Slow EMA period
    pub ema_slow: usize,
    /// RSI lookback
    pub rsi_period: usize,
    /// Buy when RSI crosses up through this level
    pub rsi_buy: f64,
    /// Sell when RSI crosses down through this level
    pub rsi_sell: f64,
    /// Annual risk-free rate for the Sharpe ratio
    pub risk_free: f64,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::EmaCross,
            fee: 0.0005,
            slippage: 0.0002,
            ema_fast: 12,
            ema_slow: 26,
            rsi_period: 14,
            rsi_buy: 30.0,
            rsi_sell: 70.0,
            risk_free: 0.0,
        }
    }
}

impl RunParams {
    /// Checks the parameters used by the selected strategy.
    ///
    /// Costs must lie in `[0, 1)` and the risk-free rate must be finite
    /// whatever the strategy.
    ///
    /// # Errors
    /// `InvalidParams` describing the first violation.
    pub fn validate(&self) -> Result<(), BacktestError> {
        if !(0.0..1.0).contains(&self.fee) {
            return Err(BacktestError::invalid_params(format!(
                "fee {} must be in [0, 1)",
                self.fee
            )));
        }
        if !(0.0..1.0).contains(&self.slippage) {
            return Err(BacktestError::invalid_params(format!(
                "slippage {} must be in [0, 1)",
                self.slippage
            )));
        }
        if !self.risk_free.is_finite() {
            return Err(BacktestError::invalid_params("risk_free must be finite"));
        }

        match self.strategy {
            StrategyKind::EmaCross => {
                if self.ema_fast == 0 || self.ema_fast >= self.ema_slow {
                    return Err(BacktestError::invalid_params(format!(
                        "EMA periods need 0 < fast < slow, got fast {} slow {}",
                        self.ema_fast, self.ema_slow
                    )));
                }
            }
            StrategyKind::Rsi => {
                if self.rsi_period == 0 {
                    return Err(BacktestError::invalid_params("rsi_period must be positive"));
                }
                if !(0.0 <= self.rsi_buy && self.rsi_buy < self.rsi_sell && self.rsi_sell <= 100.0) {
                    return Err(BacktestError::invalid_params(format!(
                        "RSI thresholds need 0 <= buy < sell <= 100 (buy below sell is required \
                         by this backtester), got buy {} sell {}",
                        self.rsi_buy, self.rsi_sell
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Trade direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Enter the long position.
    Buy,
    /// Exit to flat.
    Sell,
}

/// One fill.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Bar timestamp of the fill
    pub time: DateTime<Utc>,
    /// Buy or sell
    pub side: Side,
    /// Fill price including slippage
    pub price: f64,
    /// Units traded, in equity-normalised terms
    pub qty: f64,
}

/// Output of [`run_backtest`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Equity per bar, starting at 1
    pub equity: Vec<f64>,
    /// Fills in time order
    pub trades: Vec<Trade>,
    /// Summary statistics
    pub metrics: Metrics,
}

impl BacktestResult {
    fn flat() -> Self {
        Self {
            equity: vec![1.0],
            trades: Vec::new(),
            metrics: Metrics::default(),
        }
    }

    /// Equity at the last bar.
    pub fn final_equity(&self) -> f64 {
        self.equity.last().copied().unwrap_or(1.0)
    }
}

/// Indicator traces the strategy reads, computed once per run.
enum Signals {
    EmaCross {
        fast: Vec<Option<f64>>,
        slow: Vec<Option<f64>>,
    },
    Rsi {
        values: Vec<Option<f64>>,
        buy: f64,
        sell: f64,
    },
}

impl Signals {
    fn new(closes: &[f64], params: &RunParams) -> Self {
        match params.strategy {
            StrategyKind::EmaCross => Signals::EmaCross {
                fast: ema(closes, params.ema_fast),
                slow: ema(closes, params.ema_slow),
            },
            StrategyKind::Rsi => Signals::Rsi {
                values: rsi(closes, params.rsi_period),
                buy: params.rsi_buy,
                sell: params.rsi_sell,
            },
        }
    }

    /// Signal at bar `i ≥ 1`, if any.
    fn at(&self, i: usize) -> Option<Side> {
        match self {
            Signals::EmaCross { fast, slow } => {
                let prev = fast[i - 1]? - slow[i - 1]?;
                let curr = fast[i]? - slow[i]?;
                if prev <= 0.0 && curr > 0.0 {
                    Some(Side::Buy)
                } else if prev >= 0.0 && curr < 0.0 {
                    Some(Side::Sell)
                } else {
                    None
                }
            }
            Signals::Rsi { values, buy, sell } => {
                let (r0, r1) = (values[i - 1]?, values[i]?);
                if r0 < *buy && r1 >= *buy {
                    Some(Side::Buy)
                } else if r0 > *sell && r1 <= *sell {
                    Some(Side::Sell)
                } else {
                    None
                }
            }
        }
    }
}

/// Runs a long/flat backtest of `params.strategy` over `series`.
///
/// Series with fewer than two bars produce a flat result: equity `[1]`, no
/// trades and zero metrics. A position still open at the last bar stays in
/// the equity curve but does not count as a completed round trip.
///
/// # Errors
/// `InvalidParams` when [`RunParams::validate`] fails.
///
/// # Examples
///
/// ```
/// use pricer_backtest::{run_backtest, synthetic_gbm_series, RunParams};
///
/// let series = synthetic_gbm_series(500, 100.0, 0.08, 0.2, 42).unwrap();
/// let result = run_backtest(&series, &RunParams::default()).unwrap();
///
/// assert_eq!(result.equity.len(), 500);
/// assert_eq!(result.equity[0], 1.0);
/// assert_eq!(result.metrics.n_trades, result.trades.len());
/// ```
pub fn run_backtest(series: &Series, params: &RunParams) -> Result<BacktestResult, BacktestError> {
    params.validate()?;

    let bars = series.bars();
    if bars.len() < 2 {
        debug!(bars = bars.len(), "Too few bars, returning flat result");
        return Ok(BacktestResult::flat());
    }

    let closes = series.closes();
    let signals = Signals::new(&closes, params);

    let mut equity = 1.0;
    let mut curve = Vec::with_capacity(bars.len());
    curve.push(equity);

    let mut trades = Vec::new();
    let mut units = 0.0;
    let mut entry_equity: Option<f64> = None;
    let (mut round_trips, mut wins) = (0_usize, 0_usize);

    for i in 1..bars.len() {
        let close = closes[i];
        if entry_equity.is_some() {
            equity *= close / closes[i - 1];
        }

        match (signals.at(i), entry_equity) {
            (Some(Side::Buy), None) => {
                let fill = close * (1.0 + params.slippage);
                entry_equity = Some(equity);
                units = equity * (1.0 - params.fee) / fill;
                equity = units * close;
                trades.push(Trade {
                    time: bars[i].time,
                    side: Side::Buy,
                    price: fill,
                    qty: units,
                });
                debug!(bar = i, fill, equity, "BUY");
            }
            (Some(Side::Sell), Some(before)) => {
                let fill = close * (1.0 - params.slippage);
                equity = units * fill * (1.0 - params.fee);
                trades.push(Trade {
                    time: bars[i].time,
                    side: Side::Sell,
                    price: fill,
                    qty: units,
                });
                round_trips += 1;
                if equity > before {
                    wins += 1;
                }
                debug!(bar = i, fill, equity, pnl = equity - before, "SELL");
                entry_equity = None;
                units = 0.0;
            }
            _ => {}
        }
        curve.push(equity);
    }

    let elapsed_days = series
        .span()
        .map(|(first, last)| (last - first).num_seconds() as f64 / 86_400.0)
        .unwrap_or(0.0);
    let win_rate = if round_trips > 0 {
        wins as f64 / round_trips as f64
    } else {
        0.0
    };
    let metrics = Metrics {
        win_rate,
        n_trades: trades.len(),
        ..metrics::compute(&curve, elapsed_days, params.risk_free)
    };

    info!(
        strategy = ?params.strategy,
        bars = bars.len(),
        trades = trades.len(),
        final_equity = equity,
        sharpe = metrics.sharpe,
        maxdd = metrics.maxdd,
        "Backtest complete"
    );

    Ok(BacktestResult {
        equity: curve,
        trades,
        metrics,
    })
}
