//! Option and barrier classification enums shared by the closed-form and
//! Monte Carlo pricers.

/// Option type (call or put).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Call option
    Call,
    /// Put option
    Put,
}

impl OptionType {
    /// `+1` for calls, `-1` for puts.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Builds the option type from the `is_call` flag used by flat argument
    /// lists.
    #[inline]
    pub fn from_is_call(is_call: bool) -> Self {
        if is_call {
            OptionType::Call
        } else {
            OptionType::Put
        }
    }

    /// Terminal payoff `max(φ(s - k), 0)`.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::OptionType;
    ///
    /// assert_eq!(OptionType::Call.payoff(110.0, 100.0), 10.0);
    /// assert_eq!(OptionType::Put.payoff(110.0, 100.0), 0.0);
    /// ```
    #[inline]
    pub fn payoff(self, s: f64, k: f64) -> f64 {
        (self.sign() * (s - k)).max(0.0)
    }
}

/// Barrier option direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BarrierDirection {
    /// Barrier is above the current spot price
    Up,
    /// Barrier is below the current spot price
    Down,
}

impl BarrierDirection {
    /// Whether `s` sits on or beyond the barrier `h`.
    ///
    /// A down barrier is breached at `s <= h`, an up barrier at `s >= h`.
    #[inline]
    pub fn is_breached(self, s: f64, h: f64) -> bool {
        match self {
            BarrierDirection::Down => s <= h,
            BarrierDirection::Up => s >= h,
        }
    }
}

/// Barrier option knock type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum KnockType {
    /// Option is activated (knocked in) when barrier is hit
    In,
    /// Option is deactivated (knocked out) when barrier is hit
    Out,
}
