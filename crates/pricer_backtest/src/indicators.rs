//! Technical indicators over closing prices.
//!
//! Both indicators return one value per input point, `None` until their
//! lookback window is full. Callers compare `Option`s, so a warm-up bar can
//! never produce a signal.

/// Exponential moving average with smoothing `2 / (period + 1)`.
///
/// Seeded with the simple average of the first `period` values at index
/// `period - 1`; earlier points are `None`. A zero period or a series shorter
/// than `period` yields all `None`.
///
/// Both the seed and the update are taken as offsets (`x0 + mean(x - x0)`,
/// `prev + k·(v - prev)`), so a constant input reproduces its value exactly
/// and EMAs of different periods never separate on a flat series.
///
/// # Examples
///
/// ```
/// use pricer_backtest::indicators::ema;
///
/// let out = ema(&[1.0, 2.0, 3.0, 4.0], 3);
/// assert_eq!(out[..2], [None, None]);
/// assert_eq!(out[2], Some(2.0));
/// assert_eq!(out[3], Some(3.0));
/// ```
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let first = values[0];
    let offset = values[..period].iter().map(|v| v - first).sum::<f64>();
    let mut prev = first + offset / period as f64;
    out[period - 1] = Some(prev);
    for (i, &v) in values.iter().enumerate().skip(period) {
        prev += k * (v - prev);
        out[i] = Some(prev);
    }
    out
}

/// Relative strength index with Wilder smoothing.
///
/// The first value sits at index `period` and averages the first `period`
/// price changes; later averages use `avg = (avg·(period-1) + x) / period`.
/// A window without losses reads 100.
///
/// # Examples
///
/// ```
/// use pricer_backtest::indicators::rsi;
///
/// let rising: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
/// let out = rsi(&rising, 14);
/// assert!(out[13].is_none());
/// assert_eq!(out[14], Some(100.0));
/// ```
pub fn rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() <= period {
        return out;
    }

    let change = |i: usize| values[i] - values[i - 1];
    let p = period as f64;

    let (mut avg_gain, mut avg_loss) = (1..=period).fold((0.0, 0.0), |(g, l), i| {
        let d = change(i);
        (g + d.max(0.0), l + (-d).max(0.0))
    });
    avg_gain /= p;
    avg_loss /= p;
    out[period] = Some(rsi_value(avg_gain, avg_loss));

    for (i, slot) in out.iter_mut().enumerate().skip(period + 1) {
        let d = change(i);
        avg_gain = (avg_gain * (p - 1.0) + d.max(0.0)) / p;
        avg_loss = (avg_loss * (p - 1.0) + (-d).max(0.0)) / p;
        *slot = Some(rsi_value(avg_gain, avg_loss));
    }
    out
}

#[inline]
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_ema_recursion() {
        let values = [10.0, 11.0, 12.0, 13.0, 12.0];
        let out = ema(&values, 2);
        let k = 2.0 / 3.0;
        assert_eq!(out[0], None);
        assert_relative_eq!(out[1].unwrap(), 10.5);
        let e2 = 12.0 * k + 10.5 * (1.0 - k);
        assert_relative_eq!(out[2].unwrap(), e2, epsilon = 1e-12);
        let e3 = 13.0 * k + e2 * (1.0 - k);
        assert_relative_eq!(out[3].unwrap(), e3, epsilon = 1e-12);
    }

    #[test]
    fn test_ema_constant_input_is_exact() {
        for level in [0.1, 1.0 / 3.0, 100.0, 123.456_789, 98_765.432_1] {
            let values = [level; 120];
            for period in 1..40 {
                let out = ema(&values, period);
                assert!(out[period - 1..].iter().all(|v| *v == Some(level)), "level {level} period {period}");
            }
        }
    }

    #[test]
    fn test_ema_short_or_zero_period() {
        assert!(ema(&[1.0, 2.0], 3).iter().all(Option::is_none));
        assert!(ema(&[1.0, 2.0], 0).iter().all(Option::is_none));
        assert!(ema(&[], 5).is_empty());
    }

    #[test]
    fn test_ema_period_one_is_identity() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        let out: Vec<f64> = ema(&values, 1).into_iter().map(|v| v.unwrap()).collect();
        assert_eq!(out, values);
    }

    #[test]
    fn test_rsi_hand_computed() {
        // Changes: +1, -2, +3, then +1.
        let values = [10.0, 11.0, 9.0, 12.0, 13.0];
        let out = rsi(&values, 3);
        assert!(out[..3].iter().all(Option::is_none));

        let (g, l) = (4.0 / 3.0, 2.0 / 3.0);
        assert_relative_eq!(out[3].unwrap(), 100.0 - 100.0 / (1.0 + g / l), epsilon = 1e-12);

        let (g, l) = ((g * 2.0 + 1.0) / 3.0, (l * 2.0) / 3.0);
        assert_relative_eq!(out[4].unwrap(), 100.0 - 100.0 / (1.0 + g / l), epsilon = 1e-12);
    }

    #[test]
    fn test_rsi_falling_series_reads_zero() {
        let falling: Vec<f64> = (0..10).map(|i| 50.0 - i as f64).collect();
        assert_relative_eq!(rsi(&falling, 5)[9].unwrap(), 0.0);
    }

    #[test]
    fn test_rsi_needs_period_plus_one_points() {
        assert!(rsi(&[1.0, 2.0, 3.0], 3).iter().all(Option::is_none));
    }

    proptest! {
        #[test]
        fn prop_rsi_in_range(values in prop::collection::vec(1.0f64..200.0, 2..80), period in 1usize..20) {
            for v in rsi(&values, period).into_iter().flatten() {
                prop_assert!((0.0..=100.0).contains(&v));
            }
        }

        #[test]
        fn prop_ema_of_constant_is_constant(level in 0.01f64..1e5, period in 1usize..30) {
            let out = ema(&vec![level; 64], period);
            prop_assert!(out[period - 1..].iter().all(|v| *v == Some(level)));
        }

        #[test]
        fn prop_ema_within_input_range(values in prop::collection::vec(1.0f64..200.0, 1..80), period in 1usize..20) {
            let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            for v in ema(&values, period).into_iter().flatten() {
                prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
            }
        }
    }
}
