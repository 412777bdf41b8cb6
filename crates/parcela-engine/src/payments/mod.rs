//! Payment processing state machine.
//!
//! Applies payment events to installments, consulting the accrual engine
//! for the amount actually due on the payment date. Transitions:
//!
//! ```text
//! Pending --------> Paid
//! Pending --------> PartiallyPaid (+ residual Pending installment)
//! Pending/PartiallyPaid --> Cancelled
//! ```
//!
//! `Paid` and `Cancelled` are terminal; events against them are rejected
//! with `TerminalState`. `Overdue` never appears here: it is a read-side
//! classification (see `Installment::effective_status`), so an overdue
//! installment is stored as `Pending` and pays like one, with the late
//! accrual priced in.
//!
//! Everything is pure: the caller's installment is taken by reference and
//! an updated copy is returned. Serializing concurrent payments against
//! one installment is the owning storage layer's job.

use rust_decimal::Decimal;

use parcela_core::types::Date;

use crate::accrual::{accrue, Accrual};
use crate::error::{EngineError, EngineResult};
use crate::types::{Installment, InterestPolicy, PaymentEvent};

/// Result of applying a payment event.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOutcome {
    /// The installment after the transition.
    pub updated: Installment,
    /// Residual installment created by a partial payment, if any.
    pub residual: Option<Installment>,
    /// The accrual breakdown used to compute the amount due.
    pub accrual: Accrual,
}

/// Applies a payment event to an installment.
///
/// The amount due is `amount + penalty + interest - discount` as of the
/// payment date. A payment covering it settles the installment with
/// `paid_amount` equal to the amount due (overpayment is not retained).
/// A smaller payment marks it partially paid and produces a residual
/// installment for the remainder, due on the same date and linked to the
/// original.
///
/// # Errors
///
/// - `EngineError::TerminalState` if the installment is Paid or Cancelled
/// - `EngineError::NegativeAmount` if the tendered amount is negative
/// - any accrual error (e.g. `PolicyTierGap`)
pub fn pay(
    installment: &Installment,
    event: &PaymentEvent,
    policy: &InterestPolicy,
) -> EngineResult<PaymentOutcome> {
    if installment.status().is_terminal() {
        return Err(EngineError::terminal_state(
            installment.sequence(),
            installment.status(),
        ));
    }
    if event.amount_paid < Decimal::ZERO {
        return Err(EngineError::negative_amount(event.amount_paid));
    }

    let accrual = accrue(installment, event.payment_date, policy)?;
    let amount_due = accrual.amount_due(installment.amount());

    let mut updated = installment.clone();

    if event.amount_paid >= amount_due {
        updated.mark_paid(amount_due, event.payment_date);
        tracing::debug!(
            sequence = installment.sequence(),
            amount_due = %amount_due,
            "installment settled"
        );
        return Ok(PaymentOutcome {
            updated,
            residual: None,
            accrual,
        });
    }

    let remaining = amount_due - event.amount_paid;
    updated.mark_partially_paid(event.amount_paid, event.payment_date);
    let residual = updated.residual(remaining);

    tracing::debug!(
        sequence = installment.sequence(),
        paid = %event.amount_paid,
        remaining = %remaining,
        "partial payment, residual created"
    );

    Ok(PaymentOutcome {
        updated,
        residual: Some(residual),
        accrual,
    })
}

/// Cancels an installment.
///
/// Cancellation is unconditional for any non-terminal installment. A paid
/// obligation cannot be cancelled; reversing a settled payment is a
/// separate explicit operation owned by the caller.
///
/// # Errors
///
/// Returns `EngineError::TerminalState` if the installment is already
/// Paid or Cancelled.
pub fn cancel(installment: &Installment, reason: impl Into<String>) -> EngineResult<Installment> {
    if installment.status().is_terminal() {
        return Err(EngineError::terminal_state(
            installment.sequence(),
            installment.status(),
        ));
    }

    let mut updated = installment.clone();
    updated.mark_cancelled(reason.into());
    tracing::debug!(sequence = installment.sequence(), "installment cancelled");
    Ok(updated)
}

/// Convenience: applies a payment on a given date for exactly the amount
/// due on that date.
///
/// # Errors
///
/// Same as [`pay`].
pub fn settle(
    installment: &Installment,
    payment_date: Date,
    policy: &InterestPolicy,
) -> EngineResult<PaymentOutcome> {
    let accrual = accrue(installment, payment_date, policy)?;
    let event = PaymentEvent::new(accrual.amount_due(installment.amount()), payment_date);
    pay(installment, &event, policy)
}
