//! Monte Carlo aggregation engine.
//!
//! The engine runs a caller-supplied trial function `paths` times against one
//! generator and aggregates the returned values. It performs no discounting
//! and knows nothing about payoffs; product pricers own that logic and hand
//! the engine a closure returning one discounted payoff per trial.

use pricer_core::math::stats::RunningStats;
use rayon::prelude::*;
use tracing::debug;

use super::config::McOptions;
use super::error::ConfigError;
use crate::rng::XorShift32;

/// Monte Carlo price estimate.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PriceEstimate;
///
/// let estimate = PriceEstimate { price: 10.0, standard_error: 0.05 };
/// let (lo, hi) = estimate.confidence_interval_95();
/// assert!(lo < 10.0 && hi > 10.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceEstimate {
    /// Sample mean of the discounted payoffs.
    pub price: f64,
    /// Standard error of the mean, `sqrt(s² / paths)`.
    pub standard_error: f64,
}

impl PriceEstimate {
    /// Half-width of the 95% confidence interval.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.standard_error
    }

    /// 95% confidence interval `(price - 1.96 se, price + 1.96 se)`.
    #[inline]
    pub fn confidence_interval_95(&self) -> (f64, f64) {
        let half = self.confidence_95();
        (self.price - half, self.price + half)
    }

    /// Pools independent estimates of equal path count into one.
    ///
    /// The pooled price is the average and the pooled standard error is
    /// `sqrt(Σ se²) / k`. Returns `None` for an empty slice.
    pub fn pooled(estimates: &[PriceEstimate]) -> Option<PriceEstimate> {
        if estimates.is_empty() {
            return None;
        }
        let k = estimates.len() as f64;
        let price = estimates.iter().map(|e| e.price).sum::<f64>() / k;
        let var = estimates
            .iter()
            .map(|e| e.standard_error * e.standard_error)
            .sum::<f64>();
        Some(PriceEstimate {
            price,
            standard_error: var.sqrt() / k,
        })
    }
}

/// Runs `options.paths` trials of `simulate` and aggregates the results.
///
/// `simulate(rng, index)` receives the shared generator for this run and
/// the trial index, and returns the discounted payoff of that trial. Trials
/// consume consecutive positions of the generator, so no draw is reused.
///
/// # Errors
///
/// `ConfigError` if `options` fail validation.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{monte_carlo, McOptions};
///
/// // E[U] for U ~ Uniform(0, 1)
/// let options = McOptions::builder().paths(100_000).seed(9).build().unwrap();
/// let estimate = monte_carlo(&options, |rng, _| rng.uniform()).unwrap();
///
/// assert!((estimate.price - 0.5).abs() < 4.0 * estimate.standard_error);
/// ```
pub fn monte_carlo<F>(options: &McOptions, mut simulate: F) -> Result<PriceEstimate, ConfigError>
where
    F: FnMut(&mut XorShift32, usize) -> f64,
{
    options.validate()?;

    let mut rng = XorShift32::new(options.seed);
    let mut stats = RunningStats::new();
    for index in 0..options.paths {
        stats.push(simulate(&mut rng, index));
    }

    let estimate = PriceEstimate {
        price: stats.mean(),
        standard_error: stats.standard_error(),
    };
    debug!(
        paths = options.paths,
        seed = options.seed,
        price = estimate.price,
        standard_error = estimate.standard_error,
        "Monte Carlo run complete"
    );
    Ok(estimate)
}

/// Runs one independent [`monte_carlo`] estimate per seed in parallel.
///
/// Each seed gets its own generator; nothing is shared between threads.
/// Results come back in the order of `seeds`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{monte_carlo_seeds, McOptions, PriceEstimate};
///
/// let options = McOptions::builder().paths(10_000).build().unwrap();
/// let runs = monte_carlo_seeds(&options, &[1, 2, 3, 4], |rng, _| rng.uniform()).unwrap();
/// assert_eq!(runs.len(), 4);
///
/// let pooled = PriceEstimate::pooled(&runs).unwrap();
/// assert!((pooled.price - 0.5).abs() < 0.01);
/// ```
pub fn monte_carlo_seeds<F>(
    options: &McOptions,
    seeds: &[u32],
    simulate: F,
) -> Result<Vec<PriceEstimate>, ConfigError>
where
    F: Fn(&mut XorShift32, usize) -> f64 + Sync,
{
    options.validate()?;

    seeds
        .par_iter()
        .map(|&seed| {
            let run = McOptions { seed, ..*options };
            monte_carlo(&run, &simulate)
        })
        .collect()
}
