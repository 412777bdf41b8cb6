//! Domain types for the amortization engine.
//!
//! - [`Date`]: Calendar date for financial calculations
//! - [`RoundingMode`]: Explicit monetary rounding policy
//! - [`round_money`]: The single place monetary rounding happens

mod date;
mod money;

pub use date::Date;
pub use money::{round_money, round_money_dp, RoundingMode, MINOR_UNIT_DP};
