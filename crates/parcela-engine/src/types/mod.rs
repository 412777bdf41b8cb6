//! Domain types for the amortization engine.
//!
//! - [`Installment`]: one scheduled obligation within an amortization plan
//! - [`InstallmentStatus`]: the payment state machine's states
//! - [`PaymentEvent`]: a payment applied to one installment
//! - [`InterestPolicy`]: tiers, tolerance window, accrual model, penalties
//! - [`LedgerEntry`] / [`AdjustmentEntry`]: dated cashflow ledger records

mod installment;
mod ledger;
mod policy;

pub use installment::{Installment, InstallmentStatus, PaymentEvent};
pub use ledger::{AdjustmentEntry, EntryKind, LedgerEntry};
pub use policy::{
    AccrualModel, BillableDaysConvention, InterestPolicy, InterestPolicyBuilder, RateChange,
    RateTier,
};
