//! Installments and payment events.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use parcela_core::types::Date;

/// Payment state of an installment.
///
/// `Paid` and `Cancelled` are terminal: once reached, no further payment
/// or cancellation events are accepted. `Overdue` is derived on read via
/// [`Installment::effective_status`]; it is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstallmentStatus {
    /// Awaiting payment.
    Pending,
    /// Partially paid; a residual installment carries the remainder.
    PartiallyPaid,
    /// Fully settled. Terminal.
    Paid,
    /// Unpaid past the due date and tolerance window (derived, not stored).
    Overdue,
    /// Cancelled. Terminal.
    Cancelled,
}

impl InstallmentStatus {
    /// Returns true if no further events are accepted in this state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, InstallmentStatus::Paid | InstallmentStatus::Cancelled)
    }
}

impl fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstallmentStatus::Pending => "Pending",
            InstallmentStatus::PartiallyPaid => "Partially Paid",
            InstallmentStatus::Paid => "Paid",
            InstallmentStatus::Overdue => "Overdue",
            InstallmentStatus::Cancelled => "Cancelled",
        };
        write!(f, "{name}")
    }
}

/// One scheduled obligation within an amortization plan.
///
/// Created by the scheduler, mutated only through the payment processor,
/// never deleted: cancellation is a terminal state, not a removal.
/// Residual installments produced by partial payments keep the sequence
/// number of the original and point back to it through [`Installment::parent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// Stable identity, used for residual linkage.
    id: Uuid,
    /// 1-based position within the plan.
    sequence: u32,
    /// Scheduled amount.
    amount: Decimal,
    /// Due date (already business-day adjusted where configured).
    due_date: Date,
    /// Amount settled so far, once a payment has been applied.
    paid_amount: Option<Decimal>,
    /// Date of the settling payment.
    paid_date: Option<Date>,
    /// Stored status (never `Overdue`; that is derived on read).
    status: InstallmentStatus,
    /// Originating installment for residuals.
    parent: Option<Uuid>,
    /// Reason recorded on cancellation.
    cancel_reason: Option<String>,
}

impl Installment {
    /// Creates a pending installment.
    #[must_use]
    pub fn new(sequence: u32, amount: Decimal, due_date: Date) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence,
            amount,
            due_date,
            paid_amount: None,
            paid_date: None,
            status: InstallmentStatus::Pending,
            parent: None,
            cancel_reason: None,
        }
    }

    /// Returns the stable identity.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the 1-based sequence number within the plan.
    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Returns the scheduled amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the due date.
    #[must_use]
    pub fn due_date(&self) -> Date {
        self.due_date
    }

    /// Returns the settled amount, if any payment has been applied.
    #[must_use]
    pub fn paid_amount(&self) -> Option<Decimal> {
        self.paid_amount
    }

    /// Returns the settlement date, if any.
    #[must_use]
    pub fn paid_date(&self) -> Option<Date> {
        self.paid_date
    }

    /// Returns the stored status.
    #[must_use]
    pub fn status(&self) -> InstallmentStatus {
        self.status
    }

    /// Returns the originating installment id for residuals.
    #[must_use]
    pub fn parent(&self) -> Option<Uuid> {
        self.parent
    }

    /// Returns the recorded cancellation reason, if cancelled.
    #[must_use]
    pub fn cancel_reason(&self) -> Option<&str> {
        self.cancel_reason.as_deref()
    }

    /// Returns true if this is a residual produced by a partial payment.
    #[must_use]
    pub fn is_residual(&self) -> bool {
        self.parent.is_some()
    }

    /// Returns the status as observed on `as_of`.
    ///
    /// A stored `Pending` installment reports `Overdue` once `as_of` is
    /// more than `tolerance_days` past the due date. The stored status is
    /// untouched; overdue is a read-side classification.
    #[must_use]
    pub fn effective_status(&self, as_of: Date, tolerance_days: i64) -> InstallmentStatus {
        match self.status {
            InstallmentStatus::Pending | InstallmentStatus::PartiallyPaid => {
                let days_late = self.due_date.days_between(&as_of);
                if days_late > tolerance_days {
                    InstallmentStatus::Overdue
                } else {
                    self.status
                }
            }
            other => other,
        }
    }

    /// Marks the installment fully settled.
    pub(crate) fn mark_paid(&mut self, amount_due: Decimal, paid_date: Date) {
        self.paid_amount = Some(amount_due);
        self.paid_date = Some(paid_date);
        self.status = InstallmentStatus::Paid;
    }

    /// Marks the installment partially paid.
    pub(crate) fn mark_partially_paid(&mut self, paid: Decimal, paid_date: Date) {
        self.paid_amount = Some(paid);
        self.paid_date = Some(paid_date);
        self.status = InstallmentStatus::PartiallyPaid;
    }

    /// Marks the installment cancelled with a reason.
    pub(crate) fn mark_cancelled(&mut self, reason: String) {
        self.cancel_reason = Some(reason);
        self.status = InstallmentStatus::Cancelled;
    }

    /// Creates the residual installment for an unpaid remainder.
    ///
    /// Same sequence and due date as the original; linked via `parent` so
    /// ordering and traceability are preserved.
    pub(crate) fn residual(&self, remaining: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence: self.sequence,
            amount: remaining,
            due_date: self.due_date,
            paid_amount: None,
            paid_date: None,
            status: InstallmentStatus::Pending,
            parent: Some(self.id),
            cancel_reason: None,
        }
    }
}

/// A payment applied to one installment.
///
/// Consumed once, producing a state transition and optionally a residual
/// installment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentEvent {
    /// Amount tendered.
    pub amount_paid: Decimal,
    /// Date the payment was made.
    pub payment_date: Date,
}

impl PaymentEvent {
    /// Creates a new payment event.
    #[must_use]
    pub fn new(amount_paid: Decimal, payment_date: Date) -> Self {
        Self {
            amount_paid,
            payment_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_new_installment_is_pending() {
        let inst = Installment::new(1, dec!(100.00), date(2025, 3, 10));
        assert_eq!(inst.status(), InstallmentStatus::Pending);
        assert_eq!(inst.paid_amount(), None);
        assert!(!inst.is_residual());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(InstallmentStatus::Paid.is_terminal());
        assert!(InstallmentStatus::Cancelled.is_terminal());
        assert!(!InstallmentStatus::Pending.is_terminal());
        assert!(!InstallmentStatus::PartiallyPaid.is_terminal());
        assert!(!InstallmentStatus::Overdue.is_terminal());
    }

    #[test]
    fn test_effective_status_overdue_is_derived() {
        let inst = Installment::new(1, dec!(100.00), date(2025, 3, 10));

        // Within the tolerance window: still pending
        assert_eq!(
            inst.effective_status(date(2025, 3, 13), 3),
            InstallmentStatus::Pending
        );
        // One day beyond: overdue on read, stored status untouched
        assert_eq!(
            inst.effective_status(date(2025, 3, 14), 3),
            InstallmentStatus::Overdue
        );
        assert_eq!(inst.status(), InstallmentStatus::Pending);
    }

    #[test]
    fn test_residual_links_to_parent() {
        let inst = Installment::new(2, dec!(1000.00), date(2025, 3, 10));
        let residual = inst.residual(dec!(400.00));

        assert_eq!(residual.sequence(), 2);
        assert_eq!(residual.amount(), dec!(400.00));
        assert_eq!(residual.due_date(), inst.due_date());
        assert_eq!(residual.status(), InstallmentStatus::Pending);
        assert_eq!(residual.parent(), Some(inst.id()));
        assert!(residual.is_residual());
    }

    #[test]
    fn test_serde_round_trip() {
        let inst = Installment::new(1, dec!(333.34), date(2025, 3, 10));
        let json = serde_json::to_string(&inst).unwrap();
        let back: Installment = serde_json::from_str(&json).unwrap();
        assert_eq!(inst, back);
    }
}
