//! Plain parameter structs consumed by every pricer.
//!
//! Both are immutable per pricing call; pricers take them by reference and
//! never hold on to them.

use super::option::{BarrierDirection, KnockType, OptionType};

/// Market and contract inputs for a European option.
///
/// # Examples
/// ```
/// use pricer_core::types::{MarketParams, OptionType};
///
/// let params = MarketParams::new(100.0, 100.0, 0.02, 0.0, 0.2, 1.0, OptionType::Call);
/// assert!((params.forward() - 100.0 * 0.02_f64.exp()).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketParams {
    /// Spot price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Domestic risk-free rate (r), continuously compounded
    pub rate: f64,
    /// Dividend or foreign yield (q), continuously compounded
    pub dividend: f64,
    /// Volatility (σ)
    pub volatility: f64,
    /// Time to expiry in years (T)
    pub maturity: f64,
    /// Call or put
    pub option_type: OptionType,
}

impl MarketParams {
    /// Creates new market parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        dividend: f64,
        volatility: f64,
        maturity: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            rate,
            dividend,
            volatility,
            maturity,
            option_type,
        }
    }

    /// Same inputs with the other option type.
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    /// Forward price `S e^{(r-q)T}`.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.spot * ((self.rate - self.dividend) * self.maturity).exp()
    }

    /// Discount factor `e^{-rT}`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Dividend discount factor `e^{-qT}`.
    #[inline]
    pub fn dividend_factor(&self) -> f64 {
        (-self.dividend * self.maturity).exp()
    }
}

/// Single-barrier contract: market inputs plus barrier level and type.
///
/// # Examples
/// ```
/// use pricer_core::types::{BarrierDirection, BarrierSpec, KnockType, MarketParams, OptionType};
///
/// let market = MarketParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 1.0, OptionType::Call);
/// let spec = BarrierSpec::new(market, 90.0, BarrierDirection::Down, KnockType::Out);
/// assert!(!spec.is_breached());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierSpec {
    /// Market and vanilla contract inputs
    pub market: MarketParams,
    /// Barrier level (H)
    pub barrier: f64,
    /// Whether the barrier sits below (down) or above (up) spot
    pub direction: BarrierDirection,
    /// Knock-in or knock-out
    pub knock: KnockType,
}

impl BarrierSpec {
    /// Creates a new barrier specification.
    pub fn new(
        market: MarketParams,
        barrier: f64,
        direction: BarrierDirection,
        knock: KnockType,
    ) -> Self {
        Self {
            market,
            barrier,
            direction,
            knock,
        }
    }

    /// Whether spot already sits on or beyond the barrier.
    #[inline]
    pub fn is_breached(&self) -> bool {
        self.direction.is_breached(self.market.spot, self.barrier)
    }
}
