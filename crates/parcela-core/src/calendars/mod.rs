//! Business day calendars and due-date adjustment.
//!
//! This module provides:
//! - The [`Calendar`] trait: holiday sets and the business-day predicate
//! - [`DueDateAdjustment`]: forward/backward rolling to a valid business day
//! - [`BrazilCalendar`]: national holidays including Easter-based moveable ones

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

mod brazil;

pub use brazil::{easter_sunday, BrazilCalendar, MAX_YEAR, MIN_YEAR};

use crate::error::CoreResult;
use crate::types::Date;

/// Due-date adjustment policy.
///
/// Specifies how a due date that falls on a non-business day is rolled.
/// This is a caller-selected policy carried in configuration; the engine
/// never picks a direction on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DueDateAdjustment {
    /// No adjustment - use the date as-is even if not a business day.
    #[default]
    None,
    /// Move to the next business day.
    NextBusinessDay,
    /// Move to the previous business day.
    PreviousBusinessDay,
}

impl std::fmt::Display for DueDateAdjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DueDateAdjustment::None => "None",
            DueDateAdjustment::NextBusinessDay => "Next Business Day",
            DueDateAdjustment::PreviousBusinessDay => "Previous Business Day",
        };
        write!(f, "{name}")
    }
}

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs weekends/holidays
/// for a jurisdiction, and roll dates to valid business days.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    ///
    /// A business day is neither a weekend nor a holiday.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a weekend or holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Returns the holiday set (fixed plus moveable) for one year.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnsupportedYear` if the year is outside the
    /// calendar's supported range.
    fn holidays_for(&self, year: i32) -> CoreResult<Arc<BTreeSet<Date>>>;

    /// Rolls a date to a business day per the given adjustment policy.
    ///
    /// Idempotent: a date that is already a business day is returned
    /// unchanged regardless of direction.
    fn adjust(&self, date: Date, adjustment: DueDateAdjustment) -> Date {
        match adjustment {
            DueDateAdjustment::None => date,
            DueDateAdjustment::NextBusinessDay => {
                let mut result = date;
                while !self.is_business_day(result) {
                    result = result.add_days(1);
                }
                result
            }
            DueDateAdjustment::PreviousBusinessDay => {
                let mut result = date;
                while !self.is_business_day(result) {
                    result = result.add_days(-1);
                }
                result
            }
        }
    }
}

/// A simple weekend-only calendar (no holidays).
///
/// Useful for testing or when holiday data is not required.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }

    fn holidays_for(&self, _year: i32) -> CoreResult<Arc<BTreeSet<Date>>> {
        Ok(Arc::new(BTreeSet::new()))
    }
}
