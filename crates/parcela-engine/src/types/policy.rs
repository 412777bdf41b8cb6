//! Interest and penalty policies.
//!
//! A policy bundles everything the accrual engine needs to price lateness:
//! tiered daily rates, a tolerance window, the accrual model, an optional
//! one-time penalty, an optional early-payment discount, and the explicit
//! conventions (billable-day counting, rounding) the caller selected.
//!
//! Policies are validated at construction through [`InterestPolicyBuilder`];
//! a misconfigured policy is rejected up front rather than producing
//! plausible-looking zeros at accrual time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use parcela_core::types::{Date, RoundingMode};

use crate::error::{EngineError, EngineResult};

/// Interest accrual model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AccrualModel {
    /// Linear daily interest on the principal.
    #[default]
    Simple,
    /// Daily compounding; interest earns interest.
    Compound,
}

/// How many of the elapsed days are billed for interest.
///
/// Whether interest counts from the due date or from the end of the
/// tolerance window varies across contracts, so the convention is an
/// explicit caller choice rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BillableDaysConvention {
    /// Bill every day since the due date. Tolerance only suppresses
    /// applicability, not the day count.
    #[default]
    FullDaysLate,
    /// Bill only the days beyond the tolerance window.
    DaysBeyondTolerance,
}

/// One tier of a tiered daily rate.
///
/// The tier with the greatest `min_days_late` not exceeding the observed
/// days late applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTier {
    /// Minimum days late for this tier to apply.
    pub min_days_late: i64,
    /// Daily interest rate as a decimal (e.g. 0.001 for 0.1% per day).
    pub daily_rate: Decimal,
}

impl RateTier {
    /// Creates a new tier.
    #[must_use]
    pub fn new(min_days_late: i64, daily_rate: Decimal) -> Self {
        Self {
            min_days_late,
            daily_rate,
        }
    }
}

/// A mid-interval rate switch for multi-period policies.
///
/// From `effective` onward the daily rate becomes `daily_rate`, replacing
/// the tier-selected rate (and any earlier change) for the remainder of
/// the accrual window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateChange {
    /// First date the new rate applies.
    pub effective: Date,
    /// Daily rate from `effective` onward.
    pub daily_rate: Decimal,
}

impl RateChange {
    /// Creates a new rate change.
    #[must_use]
    pub fn new(effective: Date, daily_rate: Decimal) -> Self {
        Self {
            effective,
            daily_rate,
        }
    }
}

/// Interest, penalty, and discount policy for accrual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestPolicy {
    tiers: Vec<RateTier>,
    tolerance_days: i64,
    accrual_model: AccrualModel,
    penalty_percent: Option<Decimal>,
    early_discount_rate: Option<Decimal>,
    billable_days: BillableDaysConvention,
    rate_changes: Vec<RateChange>,
    rounding: RoundingMode,
}

impl InterestPolicy {
    /// Starts building a policy.
    #[must_use]
    pub fn builder() -> InterestPolicyBuilder {
        InterestPolicyBuilder::new()
    }

    /// Returns the rate tiers, ordered by `min_days_late`.
    #[must_use]
    pub fn tiers(&self) -> &[RateTier] {
        &self.tiers
    }

    /// Returns the tolerance window in days.
    #[must_use]
    pub fn tolerance_days(&self) -> i64 {
        self.tolerance_days
    }

    /// Returns the accrual model.
    #[must_use]
    pub fn accrual_model(&self) -> AccrualModel {
        self.accrual_model
    }

    /// Returns the one-time penalty percentage, if configured.
    #[must_use]
    pub fn penalty_percent(&self) -> Option<Decimal> {
        self.penalty_percent
    }

    /// Returns the early-payment discount rate per day, if configured.
    #[must_use]
    pub fn early_discount_rate(&self) -> Option<Decimal> {
        self.early_discount_rate
    }

    /// Returns the billable-day convention.
    #[must_use]
    pub fn billable_days(&self) -> BillableDaysConvention {
        self.billable_days
    }

    /// Returns the mid-interval rate changes, ordered by effective date.
    #[must_use]
    pub fn rate_changes(&self) -> &[RateChange] {
        &self.rate_changes
    }

    /// Returns the rounding mode applied to accrual outputs.
    #[must_use]
    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Selects the tier for the observed days late.
    ///
    /// The greatest `min_days_late <= days_late` wins.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::PolicyTierGap` when no tier covers
    /// `days_late`: the policy is misconfigured and the engine refuses to
    /// default to zero interest.
    pub fn tier_for(&self, days_late: i64) -> EngineResult<&RateTier> {
        self.tiers
            .iter()
            .rev()
            .find(|tier| tier.min_days_late <= days_late)
            .ok_or(EngineError::PolicyTierGap { days_late })
    }
}

/// Validating builder for [`InterestPolicy`].
#[derive(Debug, Clone, Default)]
pub struct InterestPolicyBuilder {
    tiers: Vec<RateTier>,
    tolerance_days: i64,
    accrual_model: AccrualModel,
    penalty_percent: Option<Decimal>,
    early_discount_rate: Option<Decimal>,
    billable_days: BillableDaysConvention,
    rate_changes: Vec<RateChange>,
    rounding: RoundingMode,
}

impl InterestPolicyBuilder {
    /// Creates a builder with no tiers, zero tolerance, simple accrual,
    /// full-days-late billing, and half-up rounding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rate tier.
    #[must_use]
    pub fn tier(mut self, min_days_late: i64, daily_rate: Decimal) -> Self {
        self.tiers.push(RateTier::new(min_days_late, daily_rate));
        self
    }

    /// Sets the tolerance window in days.
    #[must_use]
    pub fn tolerance_days(mut self, days: i64) -> Self {
        self.tolerance_days = days;
        self
    }

    /// Sets the accrual model.
    #[must_use]
    pub fn accrual_model(mut self, model: AccrualModel) -> Self {
        self.accrual_model = model;
        self
    }

    /// Sets the one-time penalty percentage.
    #[must_use]
    pub fn penalty_percent(mut self, percent: Decimal) -> Self {
        self.penalty_percent = Some(percent);
        self
    }

    /// Sets the early-payment discount rate per day.
    #[must_use]
    pub fn early_discount_rate(mut self, rate: Decimal) -> Self {
        self.early_discount_rate = Some(rate);
        self
    }

    /// Sets the billable-day convention.
    #[must_use]
    pub fn billable_days(mut self, convention: BillableDaysConvention) -> Self {
        self.billable_days = convention;
        self
    }

    /// Adds a mid-interval rate change.
    #[must_use]
    pub fn rate_change(mut self, effective: Date, daily_rate: Decimal) -> Self {
        self.rate_changes.push(RateChange::new(effective, daily_rate));
        self
    }

    /// Sets the rounding mode for accrual outputs.
    #[must_use]
    pub fn rounding(mut self, mode: RoundingMode) -> Self {
        self.rounding = mode;
        self
    }

    /// Validates and builds the policy.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPolicy` for negative rates or
    /// tolerances, unordered or duplicated tiers, tiers whose rate
    /// decreases with lateness, or unordered rate changes.
    pub fn build(self) -> EngineResult<InterestPolicy> {
        if self.tolerance_days < 0 {
            return Err(EngineError::invalid_policy("tolerance_days must be >= 0"));
        }
        for tier in &self.tiers {
            if tier.daily_rate < Decimal::ZERO {
                return Err(EngineError::invalid_policy(format!(
                    "tier at {} days has negative rate {}",
                    tier.min_days_late, tier.daily_rate
                )));
            }
        }
        for pair in self.tiers.windows(2) {
            if pair[1].min_days_late <= pair[0].min_days_late {
                return Err(EngineError::invalid_policy(
                    "tiers must be strictly ordered by min_days_late",
                ));
            }
            // The selected rate applies retroactively to all billable
            // days, so a later tier with a lower rate would make accrued
            // interest shrink as lateness grows.
            if pair[1].daily_rate < pair[0].daily_rate {
                return Err(EngineError::invalid_policy(format!(
                    "tier at {} days lowers the rate to {} (must be >= {})",
                    pair[1].min_days_late, pair[1].daily_rate, pair[0].daily_rate
                )));
            }
        }
        if let Some(penalty) = self.penalty_percent {
            if penalty < Decimal::ZERO {
                return Err(EngineError::invalid_policy("penalty_percent must be >= 0"));
            }
        }
        if let Some(rate) = self.early_discount_rate {
            if rate < Decimal::ZERO {
                return Err(EngineError::invalid_policy(
                    "early_discount_rate must be >= 0",
                ));
            }
        }
        for change in &self.rate_changes {
            if change.daily_rate < Decimal::ZERO {
                return Err(EngineError::invalid_policy(format!(
                    "rate change at {} has negative rate {}",
                    change.effective, change.daily_rate
                )));
            }
        }
        for pair in self.rate_changes.windows(2) {
            if pair[1].effective <= pair[0].effective {
                return Err(EngineError::invalid_policy(
                    "rate changes must be strictly ordered by effective date",
                ));
            }
        }

        Ok(InterestPolicy {
            tiers: self.tiers,
            tolerance_days: self.tolerance_days,
            accrual_model: self.accrual_model,
            penalty_percent: self.penalty_percent,
            early_discount_rate: self.early_discount_rate,
            billable_days: self.billable_days,
            rate_changes: self.rate_changes,
            rounding: self.rounding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builder_defaults() {
        let policy = InterestPolicy::builder().build().unwrap();
        assert_eq!(policy.tolerance_days(), 0);
        assert_eq!(policy.accrual_model(), AccrualModel::Simple);
        assert_eq!(policy.billable_days(), BillableDaysConvention::FullDaysLate);
        assert_eq!(policy.rounding(), RoundingMode::HalfUp);
        assert!(policy.tiers().is_empty());
    }

    #[test]
    fn test_tier_selection_greatest_wins() {
        let policy = InterestPolicy::builder()
            .tier(1, dec!(0.001))
            .tier(30, dec!(0.002))
            .tier(90, dec!(0.003))
            .build()
            .unwrap();

        assert_eq!(policy.tier_for(1).unwrap().daily_rate, dec!(0.001));
        assert_eq!(policy.tier_for(29).unwrap().daily_rate, dec!(0.001));
        assert_eq!(policy.tier_for(30).unwrap().daily_rate, dec!(0.002));
        assert_eq!(policy.tier_for(365).unwrap().daily_rate, dec!(0.003));
    }

    #[test]
    fn test_tier_gap_fails_loudly() {
        let policy = InterestPolicy::builder().tier(10, dec!(0.001)).build().unwrap();

        let err = policy.tier_for(5).unwrap_err();
        assert_eq!(err, EngineError::PolicyTierGap { days_late: 5 });
    }

    #[test]
    fn test_builder_rejects_negative_rate() {
        let err = InterestPolicy::builder()
            .tier(1, dec!(-0.001))
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPolicy { .. }));
    }

    #[test]
    fn test_builder_rejects_unordered_tiers() {
        let err = InterestPolicy::builder()
            .tier(30, dec!(0.002))
            .tier(1, dec!(0.001))
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPolicy { .. }));
    }

    #[test]
    fn test_builder_rejects_decreasing_tier_rates() {
        // tier(30) below tier(1) would make interest drop from 58.00 at
        // 29 days late to 30.00 at 30, for a 1000 principal
        let err = InterestPolicy::builder()
            .tier(1, dec!(0.002))
            .tier(30, dec!(0.001))
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPolicy { .. }));

        // Equal rates across tiers remain acceptable
        assert!(InterestPolicy::builder()
            .tier(1, dec!(0.001))
            .tier(30, dec!(0.001))
            .build()
            .is_ok());
    }

    #[test]
    fn test_builder_rejects_negative_tolerance() {
        let err = InterestPolicy::builder()
            .tolerance_days(-1)
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPolicy { .. }));
    }

    #[test]
    fn test_builder_rejects_unordered_rate_changes() {
        let d1 = Date::from_ymd(2025, 2, 1).unwrap();
        let d2 = Date::from_ymd(2025, 1, 1).unwrap();
        let err = InterestPolicy::builder()
            .rate_change(d1, dec!(0.002))
            .rate_change(d2, dec!(0.001))
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPolicy { .. }));
    }
}
