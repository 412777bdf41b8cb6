//! # Parcela Engine
//!
//! Amortization scheduling, accrual, payment processing, and cashflow
//! projection for the Parcela engine.
//!
//! This crate provides:
//!
//! - **Scheduling**: Splitting a total into installments with exact,
//!   auditable rounding and business-day-adjusted due dates
//! - **Accrual**: Penalty, interest (simple/compound/tiered), and
//!   early-payment discounts as a function of elapsed time
//! - **Payments**: A small state machine applying payment events and
//!   producing residual installments
//! - **Cashflow**: Daily inflow/outflow buckets, running balances, and
//!   bank-statement reconciliation adjustments
//!
//! Every operation is a pure function of its explicit inputs; callers own
//! storage, transactions, and auditing.
//!
//! ## Example
//!
//! ```rust
//! use parcela_engine::prelude::*;
//! use parcela_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let config = SplitConfig::new(
//!     dec!(1000.00),
//!     3,
//!     Date::from_ymd(2025, 3, 10).unwrap(),
//! );
//! let plan = split(&config).unwrap();
//!
//! let amounts: Vec<_> = plan.installments().iter().map(|i| i.amount()).collect();
//! assert_eq!(amounts, vec![dec!(333.33), dec!(333.33), dec!(333.34)]);
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
#![allow(clippy::needless_pass_by_value)]

pub mod accrual;
pub mod cashflow;
pub mod error;
pub mod payments;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::accrual::{accrue, Accrual};
    pub use crate::cashflow::{
        project, reconcile, totals_by_account, totals_by_category, totals_by_cost_center,
        DailyPosition,
    };
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::payments::{cancel, pay, settle, PaymentOutcome};
    pub use crate::schedule::{split, AmortizationPlan, Periodicity, SplitConfig};
    pub use crate::types::{
        AccrualModel, AdjustmentEntry, BillableDaysConvention, EntryKind, Installment,
        InstallmentStatus, InterestPolicy, InterestPolicyBuilder, LedgerEntry, PaymentEvent,
        RateChange, RateTier,
    };
}

// Re-export commonly used items at crate root
pub use error::{EngineError, EngineResult};
pub use schedule::AmortizationPlan;
pub use types::{Installment, InstallmentStatus, InterestPolicy};
