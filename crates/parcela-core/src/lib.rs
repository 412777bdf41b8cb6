//! # Parcela Core
//!
//! Core types, calendars, and rounding rules for the Parcela amortization engine.
//!
//! This crate provides the foundational building blocks used throughout Parcela:
//!
//! - **Types**: Domain-specific types like `Date` and explicit money rounding
//! - **Business Day Calendars**: Holiday calendars with moveable (Easter-based) holidays
//! - **Adjustment Conventions**: Forward/backward due-date rolling
//!
//! ## Design Philosophy
//!
//! - **Exact Arithmetic**: All monetary values are `rust_decimal::Decimal`;
//!   rounding is explicit and happens only where documented
//! - **Explicit Over Implicit**: Rounding modes and adjustment directions are
//!   caller-selected, never silently defaulted differently across call sites
//!
//! ## Example
//!
//! ```rust
//! use parcela_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let cal = BrazilCalendar::new();
//! let due = Date::from_ymd(2023, 4, 7).unwrap(); // Good Friday
//! let adjusted = cal.adjust(due, DueDateAdjustment::NextBusinessDay);
//! assert_eq!(adjusted, Date::from_ymd(2023, 4, 10).unwrap());
//!
//! let cents = round_money(dec!(333.333333), RoundingMode::HalfUp);
//! assert_eq!(cents, dec!(333.33));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod calendars;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        easter_sunday, BrazilCalendar, Calendar, DueDateAdjustment, WeekendCalendar,
    };
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{round_money, Date, RoundingMode, MINOR_UNIT_DP};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{round_money, Date, RoundingMode};
