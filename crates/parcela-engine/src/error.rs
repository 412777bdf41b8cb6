//! Error types for engine operations.

use rust_decimal::Decimal;
use thiserror::Error;

use parcela_core::types::Date;

use crate::types::InstallmentStatus;

/// A specialized Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during scheduling, accrual, payment processing,
/// or cashflow projection.
///
/// Every failure is local and synchronous; nothing is retried internally
/// and nothing is silently swallowed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Installment count must be at least 1.
    #[error("Invalid installment count: {count} (must be >= 1)")]
    InvalidInstallmentCount {
        /// The rejected count.
        count: i32,
    },

    /// A projection range with `to` before `from`.
    #[error("Invalid date range: {to} is before {from}")]
    InvalidDateRange {
        /// Range start.
        from: Date,
        /// Range end.
        to: Date,
    },

    /// Payment or cancellation attempted against a terminal installment.
    #[error("Installment {sequence} is {status} and accepts no further events")]
    TerminalState {
        /// Sequence number of the offending installment.
        sequence: u32,
        /// The terminal status it is in.
        status: InstallmentStatus,
    },

    /// A monetary amount that must be non-negative was negative.
    #[error("Negative amount: {amount}")]
    NegativeAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// No interest tier matches the observed days late.
    ///
    /// Indicates a misconfigured policy; the engine fails loudly instead
    /// of returning a plausible-looking zero interest.
    #[error("No interest tier covers {days_late} days late")]
    PolicyTierGap {
        /// Days late with no matching tier.
        days_late: i64,
    },

    /// Policy rejected at construction time.
    #[error("Invalid policy: {reason}")]
    InvalidPolicy {
        /// Description of what's invalid.
        reason: String,
    },

    /// Core library error (dates, calendars).
    #[error("Core error: {0}")]
    Core(#[from] parcela_core::CoreError),
}

impl EngineError {
    /// Creates an invalid installment count error.
    #[must_use]
    pub fn invalid_installment_count(count: i32) -> Self {
        Self::InvalidInstallmentCount { count }
    }

    /// Creates a terminal state error.
    #[must_use]
    pub fn terminal_state(sequence: u32, status: InstallmentStatus) -> Self {
        Self::TerminalState { sequence, status }
    }

    /// Creates a negative amount error.
    #[must_use]
    pub fn negative_amount(amount: Decimal) -> Self {
        Self::NegativeAmount { amount }
    }

    /// Creates an invalid policy error.
    #[must_use]
    pub fn invalid_policy(reason: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = EngineError::invalid_installment_count(0);
        assert!(err.to_string().contains("0"));

        let err = EngineError::negative_amount(dec!(-10));
        assert!(err.to_string().contains("-10"));

        let err = EngineError::terminal_state(3, InstallmentStatus::Paid);
        assert!(err.to_string().contains("Paid"));
    }
}
