//! Amortization scheduling.
//!
//! Splits a total amount into N installments with due dates, using a
//! deterministic remainder-distribution rule: installments `1..n-1` get
//! the rounded base amount and the final installment absorbs whatever
//! remainder keeps the sum exactly equal to the total, regardless of
//! rounding direction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use parcela_core::calendars::{Calendar, DueDateAdjustment};
use parcela_core::types::{round_money, Date, RoundingMode};

use crate::error::{EngineError, EngineResult};
use crate::types::Installment;

/// Spacing between consecutive due dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Periodicity {
    /// Fixed step of calendar days (commonly 30).
    Days(u32),
    /// Same day of month, clamped to the last day of shorter months
    /// (day 31 in February becomes 28/29).
    Monthly,
}

impl Periodicity {
    /// Returns the due date `periods` steps after the anchor.
    ///
    /// Monthly stepping is anchored: each step is computed from the
    /// original date, so Jan 31 yields Feb 28 and then Mar 31, not Mar 28.
    pub fn advance(&self, anchor: Date, periods: u32) -> EngineResult<Date> {
        match self {
            Periodicity::Days(step) => Ok(anchor.add_days(i64::from(*step) * i64::from(periods))),
            Periodicity::Monthly => Ok(anchor.add_months(periods as i32)?),
        }
    }
}

impl Default for Periodicity {
    fn default() -> Self {
        Periodicity::Days(30)
    }
}

/// Configuration for splitting a total into installments.
#[derive(Clone)]
pub struct SplitConfig<'a> {
    /// Total amount to split.
    pub total: Decimal,
    /// Number of installments (>= 1).
    pub count: u32,
    /// Due date of the first installment.
    pub first_due_date: Date,
    /// Spacing between due dates.
    pub periodicity: Periodicity,
    /// Rounding mode for the base installment amount.
    pub rounding: RoundingMode,
    /// Direction for business-day adjustment of due dates.
    pub due_date_adjustment: DueDateAdjustment,
    /// Calendar consulted for the adjustment; without one, due dates are
    /// used as computed.
    pub calendar: Option<&'a dyn Calendar>,
}

impl std::fmt::Debug for SplitConfig<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitConfig")
            .field("total", &self.total)
            .field("count", &self.count)
            .field("first_due_date", &self.first_due_date)
            .field("periodicity", &self.periodicity)
            .field("rounding", &self.rounding)
            .field("due_date_adjustment", &self.due_date_adjustment)
            .field("calendar", &self.calendar.map(|c| c.name()))
            .finish()
    }
}

impl<'a> SplitConfig<'a> {
    /// Creates a configuration with 30-day periodicity, half-up rounding,
    /// and no due-date adjustment.
    #[must_use]
    pub fn new(total: Decimal, count: u32, first_due_date: Date) -> Self {
        Self {
            total,
            count,
            first_due_date,
            periodicity: Periodicity::default(),
            rounding: RoundingMode::default(),
            due_date_adjustment: DueDateAdjustment::None,
            calendar: None,
        }
    }

    /// Sets the periodicity.
    #[must_use]
    pub fn with_periodicity(mut self, periodicity: Periodicity) -> Self {
        self.periodicity = periodicity;
        self
    }

    /// Sets the rounding mode.
    #[must_use]
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Sets the calendar and adjustment direction for due dates.
    #[must_use]
    pub fn with_calendar(
        mut self,
        calendar: &'a dyn Calendar,
        adjustment: DueDateAdjustment,
    ) -> Self {
        self.calendar = Some(calendar);
        self.due_date_adjustment = adjustment;
        self
    }
}

/// An amortization plan and the installments it owns.
///
/// Immutable once materialized; regeneration creates a new plan. The
/// conservation invariant holds exactly: the installment amounts sum to
/// the plan total with no epsilon tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationPlan {
    total_amount: Decimal,
    installment_count: u32,
    first_due_date: Date,
    periodicity: Periodicity,
    installments: Vec<Installment>,
}

impl AmortizationPlan {
    /// Returns the plan total.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Returns the number of installments.
    #[must_use]
    pub fn installment_count(&self) -> u32 {
        self.installment_count
    }

    /// Returns the first due date (before adjustment).
    #[must_use]
    pub fn first_due_date(&self) -> Date {
        self.first_due_date
    }

    /// Returns the periodicity.
    #[must_use]
    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    /// Returns the installments in sequence order.
    #[must_use]
    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }
}

/// Splits a total into installments per the configuration.
///
/// The base amount is `round(total / n)` under the configured rounding
/// mode and goes to installments `1..n-1`; the final installment receives
/// `total - (n-1) * base` so the sum is exact.
///
/// # Errors
///
/// - `EngineError::InvalidInstallmentCount` if `count` is zero
/// - `EngineError::NegativeAmount` if `total` is negative
/// - `EngineError::Core` if a due date falls out of the calendar range
pub fn split(config: &SplitConfig<'_>) -> EngineResult<AmortizationPlan> {
    if config.count == 0 {
        return Err(EngineError::invalid_installment_count(0));
    }
    if config.total < Decimal::ZERO {
        return Err(EngineError::negative_amount(config.total));
    }

    let n = config.count;
    let base = round_money(config.total / Decimal::from(n), config.rounding);

    let mut installments = Vec::with_capacity(n as usize);
    let mut assigned = Decimal::ZERO;

    for seq in 1..=n {
        let amount = if seq < n {
            assigned += base;
            base
        } else {
            // Final installment absorbs the remainder exactly
            config.total - assigned
        };

        let mut due = config.periodicity.advance(config.first_due_date, seq - 1)?;
        if let Some(calendar) = config.calendar {
            due = calendar.adjust(due, config.due_date_adjustment);
        }

        installments.push(Installment::new(seq, amount, due));
    }

    tracing::debug!(
        total = %config.total,
        count = n,
        base = %base,
        "generated amortization plan"
    );

    Ok(AmortizationPlan {
        total_amount: config.total,
        installment_count: n,
        first_due_date: config.first_due_date,
        periodicity: config.periodicity,
        installments,
    })
}
