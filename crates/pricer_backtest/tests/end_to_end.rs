//! End-to-end backtests over synthetic and file-loaded series.

use pricer_backtest::{
    run_backtest, synthetic_gbm_series, BacktestError, RunParams, Series, Side, StrategyKind,
};
use proptest::prelude::*;

fn params(strategy: StrategyKind, fee: f64, slippage: f64) -> RunParams {
    RunParams {
        strategy,
        fee,
        slippage,
        ..RunParams::default()
    }
}

#[test]
fn test_trades_alternate_and_start_with_buy() {
    let series = synthetic_gbm_series(2_000, 100.0, 0.08, 0.25, 17).unwrap();
    for strategy in [StrategyKind::EmaCross, StrategyKind::Rsi] {
        let result = run_backtest(&series, &params(strategy, 0.0005, 0.0002)).unwrap();
        if let Some(first) = result.trades.first() {
            assert_eq!(first.side, Side::Buy);
        }
        for pair in result.trades.windows(2) {
            assert_ne!(pair[0].side, pair[1].side);
            assert!(pair[0].time < pair[1].time);
        }
        assert_eq!(result.equity.len(), series.len());
        assert!(result.equity.iter().all(|e| e.is_finite() && *e > 0.0));
        assert!((0.0..=1.0).contains(&result.metrics.maxdd));
    }
}

#[test]
fn test_result_serialises_with_uppercase_sides() {
    let series = synthetic_gbm_series(300, 100.0, 0.08, 0.3, 2).unwrap();
    let result = run_backtest(&series, &RunParams::default()).unwrap();
    assert!(!result.trades.is_empty());

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"BUY\""));
    assert!(json.contains("\"metrics\""));
    assert!(json.contains("\"win_rate\""));
}

#[test]
fn test_invalid_series_never_reaches_engine() {
    let data = "date,open,high,low,close\n2024-01-02,1,1,1,1\n2024-01-02,1,1,1,1\n";
    assert!(matches!(
        Series::from_csv_reader(data.as_bytes()),
        Err(BacktestError::NonMonotonicTimestamps { .. })
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_flat_csv_series_never_trades(
        level in 0.01f64..1e5,
        fast in 1usize..10,
        gap in 1usize..20,
        rsi in any::<bool>(),
    ) {
        let data: String = std::iter::once("date,open,high,low,close\n".to_string())
            .chain((0..90).map(|d| {
                let day = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(d);
                format!("{day},{level},{level},{level},{level}\n")
            }))
            .collect();
        let series = Series::from_csv_reader(data.as_bytes()).unwrap();
        let strategy = if rsi { StrategyKind::Rsi } else { StrategyKind::EmaCross };
        let run = RunParams {
            ema_fast: fast,
            ema_slow: fast + gap,
            ..params(strategy, 0.0005, 0.0002)
        };

        let result = run_backtest(&series, &run).unwrap();
        prop_assert!(result.trades.is_empty());
        prop_assert_eq!(result.final_equity(), 1.0);
        prop_assert_eq!(result.metrics.maxdd, 0.0);
    }

    #[test]
    fn prop_costs_never_improve_final_equity(
        seed in 1u32..10_000,
        fee in 0.0f64..0.01,
        slippage in 0.0f64..0.01,
        rsi in any::<bool>(),
    ) {
        let strategy = if rsi { StrategyKind::Rsi } else { StrategyKind::EmaCross };
        let series = synthetic_gbm_series(400, 100.0, 0.08, 0.2, seed).unwrap();

        let free = run_backtest(&series, &params(strategy, 0.0, 0.0)).unwrap();
        let costly = run_backtest(&series, &params(strategy, fee, slippage)).unwrap();

        prop_assert_eq!(free.trades.len(), costly.trades.len());
        prop_assert!(costly.final_equity() <= free.final_equity() * (1.0 + 1e-12));
    }

    #[test]
    fn prop_more_fee_is_no_better(seed in 1u32..10_000, fee in 0.0f64..0.005) {
        let series = synthetic_gbm_series(400, 100.0, 0.08, 0.2, seed).unwrap();
        let low = run_backtest(&series, &params(StrategyKind::EmaCross, fee, 0.0)).unwrap();
        let high = run_backtest(&series, &params(StrategyKind::EmaCross, fee + 0.001, 0.0)).unwrap();
        prop_assert!(high.final_equity() <= low.final_equity() * (1.0 + 1e-12));
    }
}
