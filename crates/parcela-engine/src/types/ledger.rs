//! Cashflow ledger records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use parcela_core::types::Date;

use crate::error::{EngineError, EngineResult};

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Inflow (revenue).
    Receita,
    /// Outflow (expense).
    Despesa,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Receita => "receita",
            EntryKind::Despesa => "despesa",
        };
        write!(f, "{name}")
    }
}

/// A dated cashflow ledger entry.
///
/// Amounts are always non-negative; direction is carried by [`EntryKind`].
/// Optional grouping keys support category, cost-center, and account
/// bucketing in projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Entry date.
    pub date: Date,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Inflow or outflow.
    pub kind: EntryKind,
    /// Free-form description.
    pub description: String,
    /// Optional category key.
    pub category: Option<String>,
    /// Optional cost-center key.
    pub cost_center: Option<String>,
    /// Optional account key.
    pub account: Option<String>,
}

impl LedgerEntry {
    /// Creates a new ledger entry.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NegativeAmount` if `amount` is negative.
    pub fn new(
        date: Date,
        amount: Decimal,
        kind: EntryKind,
        description: impl Into<String>,
    ) -> EngineResult<Self> {
        if amount < Decimal::ZERO {
            return Err(EngineError::negative_amount(amount));
        }
        Ok(Self {
            date,
            amount,
            kind,
            description: description.into(),
            category: None,
            cost_center: None,
            account: None,
        })
    }

    /// Sets the category key.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the cost-center key.
    #[must_use]
    pub fn with_cost_center(mut self, cost_center: impl Into<String>) -> Self {
        self.cost_center = Some(cost_center.into());
        self
    }

    /// Sets the account key.
    #[must_use]
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Returns the signed amount: positive for receita, negative for despesa.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            EntryKind::Receita => self.amount,
            EntryKind::Despesa => -self.amount,
        }
    }
}

/// A synthetic ledger entry produced by reconciliation.
///
/// Emitted when a reconciled bank balance diverges from the computed
/// balance; owned by the caller's ledger, not by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentEntry {
    /// Inflow or outflow.
    pub kind: EntryKind,
    /// Absolute divergence amount.
    pub amount: Decimal,
    /// Date the divergence was observed.
    pub date: Date,
    /// Why the adjustment exists.
    pub reason: String,
}
