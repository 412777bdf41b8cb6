//! Explicit monetary rounding.
//!
//! Monetary values are `rust_decimal::Decimal` throughout the engine and
//! are carried at full precision between calculation steps. Rounding to
//! the currency's minor unit happens exactly once, at the final output of
//! each operation, through [`round_money`] with a caller-selected
//! [`RoundingMode`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places of the currency minor unit (cents).
pub const MINOR_UNIT_DP: u32 = 2;

/// Monetary rounding policy.
///
/// Selected by the caller and carried in configuration; never silently
/// defaulted differently across call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RoundingMode {
    /// Round half away from zero (commercial rounding).
    #[default]
    HalfUp,
    /// Round half to even (banker's rounding).
    HalfEven,
}

impl RoundingMode {
    /// Maps the mode to the underlying `rust_decimal` strategy.
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoundingMode::HalfUp => "Half Up",
            RoundingMode::HalfEven => "Half Even",
        };
        write!(f, "{name}")
    }
}

/// Rounds a monetary amount to the currency minor unit.
#[must_use]
pub fn round_money(value: Decimal, mode: RoundingMode) -> Decimal {
    round_money_dp(value, MINOR_UNIT_DP, mode)
}

/// Rounds a monetary amount to an explicit number of decimal places.
#[must_use]
pub fn round_money_dp(value: Decimal, dp: u32, mode: RoundingMode) -> Decimal {
    value.round_dp_with_strategy(dp, mode.strategy())
}
