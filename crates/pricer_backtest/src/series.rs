//! OHLC bars and validated price series.
//!
//! A [`Series`] is the only input the backtest engine accepts. Construction
//! enforces strictly increasing timestamps and positive finite prices, so
//! the engine itself never has to re-check the data.
//!
//! Series come from three places:
//! - [`Series::new`] over bars built in memory
//! - [`Series::from_csv_reader`] / [`Series::from_csv_path`] over a
//!   `time,open,high,low,close` file
//! - [`synthetic_gbm_series`] for seeded GBM test data

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use pricer_pricing::mc::{gbm_path, GbmParams};
use pricer_pricing::rng::XorShift32;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BacktestError;

/// Trading days per year used for the synthetic step length.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// 2020-01-01T00:00:00Z, the first timestamp of a synthetic series.
const SYNTHETIC_EPOCH_SECS: i64 = 1_577_836_800;

/// One open/high/low/close bar.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    /// Bar timestamp (UTC)
    pub time: DateTime<Utc>,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
}

impl OhlcBar {
    /// Creates a bar.
    pub fn new(time: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    fn prices_valid(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite() && *p > 0.0)
    }
}

/// Time-ordered bars with strictly increasing timestamps.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Series {
    bars: Vec<OhlcBar>,
}

impl Series {
    /// Validates and wraps `bars`.
    ///
    /// # Errors
    /// - `NonMonotonicTimestamps` when a bar is not strictly after the
    ///   previous one (duplicates included)
    /// - `NonFinitePrice` when any price is NaN, infinite or not positive
    pub fn new(bars: Vec<OhlcBar>) -> Result<Self, BacktestError> {
        for (index, bar) in bars.iter().enumerate() {
            if !bar.prices_valid() {
                return Err(BacktestError::NonFinitePrice { index });
            }
            if index > 0 && bar.time <= bars[index - 1].time {
                return Err(BacktestError::NonMonotonicTimestamps { index });
            }
        }
        Ok(Self { bars })
    }

    /// Reads a CSV with a `time,open,high,low,close` header.
    ///
    /// `date` is accepted in place of `time`. Timestamps are RFC 3339 or
    /// `YYYY-MM-DD` (midnight UTC). Rows may appear in any order; they are
    /// sorted by time before validation, so duplicated timestamps are still
    /// rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_backtest::Series;
    ///
    /// let data = "date,open,high,low,close\n\
    ///             2024-01-03,101,103,100,102\n\
    ///             2024-01-02,100,102,99,101\n";
    /// let series = Series::from_csv_reader(data.as_bytes()).unwrap();
    ///
    /// assert_eq!(series.closes(), vec![101.0, 102.0]);
    /// ```
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, BacktestError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut bars = Vec::new();
        for (row_index, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
            let row = record?;
            // Header is line 1.
            let line = row_index + 2;
            let time = parse_timestamp(&row.time).ok_or_else(|| BacktestError::Parse {
                line,
                message: format!("unrecognised timestamp '{}'", row.time),
            })?;
            bars.push(OhlcBar::new(time, row.open, row.high, row.low, row.close));
        }
        bars.sort_by_key(|bar| bar.time);

        debug!(bars = bars.len(), "Loaded OHLC rows");
        Self::new(bars)
    }

    /// Opens `path` and reads it with [`Series::from_csv_reader`].
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, BacktestError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// The bars in time order.
    #[inline]
    pub fn bars(&self) -> &[OhlcBar] {
        &self.bars
    }

    /// Number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series has no bars.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// First and last timestamps, if any.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.bars.first()?.time, self.bars.last()?.time))
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "date")]
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// Daily bars from a seeded GBM close path.
///
/// Closes follow `gbm_path` with `dt = 1/252` starting at `start`; bar `i`
/// is stamped `2020-01-01 + i` days. Each bar opens at the previous close
/// (the first opens at its own close) and its high/low are the max/min of
/// open and close.
///
/// # Errors
/// `InvalidParams` when `start`, `mu` or `sigma` are rejected by
/// [`GbmParams::validate`].
///
/// # Examples
///
/// ```
/// use pricer_backtest::synthetic_gbm_series;
///
/// let series = synthetic_gbm_series(300, 100.0, 0.08, 0.2, 7).unwrap();
/// assert_eq!(series.len(), 300);
/// assert_eq!(series.bars()[0].close, 100.0);
/// ```
pub fn synthetic_gbm_series(
    n: usize,
    start: f64,
    mu: f64,
    sigma: f64,
    seed: u32,
) -> Result<Series, BacktestError> {
    if n == 0 {
        return Ok(Series::default());
    }

    let params = GbmParams::new(start, mu, sigma, 1.0 / TRADING_DAYS_PER_YEAR, n - 1);
    params
        .validate()
        .map_err(|e| BacktestError::invalid_params(e.to_string()))?;
    let closes = gbm_path(&params, &mut XorShift32::new(seed));

    let epoch = Utc
        .timestamp_opt(SYNTHETIC_EPOCH_SECS, 0)
        .single()
        .ok_or_else(|| BacktestError::invalid_params("synthetic epoch out of range"))?;

    let mut bars = Vec::with_capacity(n);
    let mut open = closes[0];
    for (i, &close) in closes.iter().enumerate() {
        bars.push(OhlcBar::new(
            epoch + Duration::days(i as i64),
            open,
            open.max(close),
            open.min(close),
            close,
        ));
        open = close;
    }
    Series::new(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_rejects_duplicate_timestamps() {
        let bars = vec![
            OhlcBar::new(day(1), 1.0, 1.0, 1.0, 1.0),
            OhlcBar::new(day(1), 1.0, 1.0, 1.0, 1.0),
        ];
        assert!(matches!(
            Series::new(bars),
            Err(BacktestError::NonMonotonicTimestamps { index: 1 })
        ));
    }

    #[test]
    fn test_rejects_bad_prices() {
        let bars = vec![
            OhlcBar::new(day(1), 1.0, 1.0, 1.0, 1.0),
            OhlcBar::new(day(2), 1.0, 1.0, 1.0, f64::NAN),
        ];
        assert!(matches!(
            Series::new(bars),
            Err(BacktestError::NonFinitePrice { index: 1 })
        ));

        let bars = vec![OhlcBar::new(day(1), 1.0, 1.0, 0.0, 1.0)];
        assert!(matches!(
            Series::new(bars),
            Err(BacktestError::NonFinitePrice { index: 0 })
        ));
    }

    #[test]
    fn test_csv_rfc3339_and_time_header() {
        let data = "time,open,high,low,close\n\
                    2024-01-02T14:30:00Z,10,11,9,10.5\n\
                    2024-01-02T16:30:00+01:00,10.5,10.7,10.4,10.6\n";
        let series = Series::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);
        let (first, last) = series.span().unwrap();
        assert_eq!(last - first, Duration::hours(1));
    }

    #[test]
    fn test_csv_equal_instants_in_different_offsets_are_duplicates() {
        let data = "time,open,high,low,close\n\
                    2024-01-02T14:30:00Z,10,11,9,10.5\n\
                    2024-01-02T15:30:00+01:00,10.5,10.7,10.4,10.6\n";
        assert!(matches!(
            Series::from_csv_reader(data.as_bytes()),
            Err(BacktestError::NonMonotonicTimestamps { index: 1 })
        ));
    }

    #[test]
    fn test_csv_bad_timestamp_reports_line() {
        let data = "date,open,high,low,close\n\
                    2024-01-02,1,1,1,1\n\
                    yesterday,1,1,1,1\n";
        match Series::from_csv_reader(data.as_bytes()) {
            Err(BacktestError::Parse { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("yesterday"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_csv_non_numeric_price_is_csv_error() {
        let data = "date,open,high,low,close\n2024-01-02,1,1,1,abc\n";
        assert!(matches!(
            Series::from_csv_reader(data.as_bytes()),
            Err(BacktestError::Csv(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Series::from_csv_path("/definitely/not/here.csv"),
            Err(BacktestError::Io(_))
        ));
    }

    #[test]
    fn test_synthetic_series_shape() {
        let series = synthetic_gbm_series(50, 100.0, 0.08, 0.2, 3).unwrap();
        assert_eq!(series.len(), 50);

        let bars = series.bars();
        assert_eq!(bars[0].open, bars[0].close);
        for pair in bars.windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
            assert_eq!(pair[1].time - pair[0].time, Duration::days(1));
            assert_relative_eq!(pair[1].high, pair[1].open.max(pair[1].close));
            assert_relative_eq!(pair[1].low, pair[1].open.min(pair[1].close));
        }
    }

    #[test]
    fn test_synthetic_series_is_reproducible() {
        let a = synthetic_gbm_series(20, 100.0, 0.08, 0.2, 11).unwrap();
        let b = synthetic_gbm_series(20, 100.0, 0.08, 0.2, 11).unwrap();
        let c = synthetic_gbm_series(20, 100.0, 0.08, 0.2, 12).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_synthetic_edge_sizes_and_validation() {
        assert!(synthetic_gbm_series(0, 100.0, 0.08, 0.2, 1).unwrap().is_empty());
        assert_eq!(synthetic_gbm_series(1, 100.0, 0.08, 0.2, 1).unwrap().len(), 1);
        assert!(matches!(
            synthetic_gbm_series(10, -1.0, 0.08, 0.2, 1),
            Err(BacktestError::InvalidParams(_))
        ));
    }
}
