//! Penalty, interest, and discount accrual.
//!
//! Given an installment, a policy, and an as-of date, computes what the
//! elapsed time is worth: an early-payment discount before the due date,
//! nothing inside the tolerance window, and a one-time penalty plus
//! tiered simple or compound interest beyond it. Multi-period policies
//! split the billable window at each rate-change date.
//!
//! All intermediate arithmetic runs at full decimal precision; rounding
//! happens once, on the final outputs, with the policy's rounding mode.

use rust_decimal::{Decimal, MathematicalOps};

use parcela_core::types::{round_money, Date};

use crate::error::EngineResult;
use crate::types::{AccrualModel, BillableDaysConvention, Installment, InterestPolicy};

/// Accrual breakdown for one installment at one as-of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accrual {
    /// One-time late penalty.
    pub penalty: Decimal,
    /// Interest for the billable days.
    pub interest: Decimal,
    /// Early-payment discount.
    pub discount: Decimal,
}

impl Accrual {
    /// An accrual of all zeros.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns the amount due for a principal under this accrual.
    #[must_use]
    pub fn amount_due(&self, principal: Decimal) -> Decimal {
        principal + self.penalty + self.interest - self.discount
    }
}

/// Computes penalty, interest, and discount for an installment.
///
/// - Strictly before the due date, an `early_discount_rate` yields a
///   pro-rata discount per day early, capped at the installment amount.
/// - Up to `tolerance_days` late, nothing accrues.
/// - Beyond the tolerance window, the one-time penalty applies and
///   interest accrues over the billable days selected by the policy's
///   [`BillableDaysConvention`]. Tier selection always uses the full
///   days late; the convention governs only the billed day count.
///
/// # Errors
///
/// Returns `EngineError::PolicyTierGap` when interest applies but no tier
/// covers the observed days late.
pub fn accrue(
    installment: &Installment,
    as_of: Date,
    policy: &InterestPolicy,
) -> EngineResult<Accrual> {
    let amount = installment.amount();
    let due_date = installment.due_date();
    let days_late = due_date.days_between(&as_of);

    if days_late < 0 {
        return Ok(early_discount(amount, -days_late, policy));
    }

    if days_late <= policy.tolerance_days() {
        // Grace period: no penalty, no interest
        return Ok(Accrual::zero());
    }

    let accrual_start = match policy.billable_days() {
        BillableDaysConvention::FullDaysLate => due_date,
        BillableDaysConvention::DaysBeyondTolerance => due_date.add_days(policy.tolerance_days()),
    };

    let penalty = policy
        .penalty_percent()
        .map(|pct| amount * pct)
        .unwrap_or(Decimal::ZERO);

    let base_rate = policy.tier_for(days_late)?.daily_rate;
    let interest = accrue_interest(amount, base_rate, accrual_start, as_of, policy);

    Ok(Accrual {
        penalty: round_money(penalty, policy.rounding()),
        interest: round_money(interest, policy.rounding()),
        discount: Decimal::ZERO,
    })
}

/// Discount for a payment `days_early` days before the due date.
fn early_discount(amount: Decimal, days_early: i64, policy: &InterestPolicy) -> Accrual {
    let Some(rate) = policy.early_discount_rate() else {
        return Accrual::zero();
    };

    // Bounded so the payable amount never goes negative
    let discount = (amount * rate * Decimal::from(days_early)).min(amount);

    Accrual {
        penalty: Decimal::ZERO,
        interest: Decimal::ZERO,
        discount: round_money(discount, policy.rounding()),
    }
}

/// Interest over `(start, as_of]`, split into sub-periods at each
/// rate-change date.
///
/// Simple interest bills each sub-period against the constant principal;
/// compounding carries the post-period value forward as the next
/// sub-period's principal.
fn accrue_interest(
    amount: Decimal,
    base_rate: Decimal,
    start: Date,
    as_of: Date,
    policy: &InterestPolicy,
) -> Decimal {
    let mut segments: Vec<(Date, Decimal)> = Vec::new();

    // Prevailing rate at the window start: the last change on or before
    // it, falling back to the tier rate.
    let mut opening_rate = base_rate;
    for change in policy.rate_changes() {
        if change.effective <= start {
            opening_rate = change.daily_rate;
        }
    }
    segments.push((start, opening_rate));

    for change in policy.rate_changes() {
        if change.effective > start && change.effective < as_of {
            segments.push((change.effective, change.daily_rate));
        }
    }

    match policy.accrual_model() {
        AccrualModel::Simple => {
            let mut interest = Decimal::ZERO;
            for (idx, &(seg_start, rate)) in segments.iter().enumerate() {
                let seg_end = segments.get(idx + 1).map_or(as_of, |next| next.0);
                let days = seg_start.days_between(&seg_end);
                interest += amount * rate * Decimal::from(days);
            }
            interest
        }
        AccrualModel::Compound => {
            let mut value = amount;
            for (idx, &(seg_start, rate)) in segments.iter().enumerate() {
                let seg_end = segments.get(idx + 1).map_or(as_of, |next| next.0);
                let days = seg_start.days_between(&seg_end);
                value *= (Decimal::ONE + rate).powi(days);
            }
            value - amount
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InterestPolicy;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn installment(amount: Decimal, due: Date) -> Installment {
        Installment::new(1, amount, due)
    }

    fn simple_policy() -> InterestPolicy {
        InterestPolicy::builder()
            .tier(1, dec!(0.001))
            .tolerance_days(3)
            .penalty_percent(dec!(0.02))
            .build()
            .unwrap()
    }

    #[test]
    fn test_reference_scenario_full_days_late() {
        // amount=1000, 10 days late, tolerance 3, rate 0.001, penalty 2%
        let inst = installment(dec!(1000), date(2025, 3, 10));
        let accrual = accrue(&inst, date(2025, 3, 20), &simple_policy()).unwrap();

        assert_eq!(accrual.penalty, dec!(20.00));
        assert_eq!(accrual.interest, dec!(10.00));
        assert_eq!(accrual.discount, dec!(0));
        assert_eq!(accrual.amount_due(dec!(1000)), dec!(1030.00));
    }

    #[test]
    fn test_reference_scenario_days_beyond_tolerance() {
        let policy = InterestPolicy::builder()
            .tier(1, dec!(0.001))
            .tolerance_days(3)
            .penalty_percent(dec!(0.02))
            .billable_days(BillableDaysConvention::DaysBeyondTolerance)
            .build()
            .unwrap();

        let inst = installment(dec!(1000), date(2025, 3, 10));
        let accrual = accrue(&inst, date(2025, 3, 20), &policy).unwrap();

        // Only the 7 days beyond the tolerance window are billed
        assert_eq!(accrual.interest, dec!(7.00));
        assert_eq!(accrual.penalty, dec!(20.00));
    }

    #[test]
    fn test_on_due_date_nothing_accrues() {
        let inst = installment(dec!(1000), date(2025, 3, 10));
        let accrual = accrue(&inst, date(2025, 3, 10), &simple_policy()).unwrap();
        assert_eq!(accrual, Accrual::zero());
    }

    #[test]
    fn test_tolerance_boundary() {
        let inst = installment(dec!(1000), date(2025, 3, 10));

        // Exactly at the tolerance limit: zero
        let at_limit = accrue(&inst, date(2025, 3, 13), &simple_policy()).unwrap();
        assert_eq!(at_limit, Accrual::zero());

        // One day beyond: penalty kicks in
        let beyond = accrue(&inst, date(2025, 3, 14), &simple_policy()).unwrap();
        assert!(beyond.penalty > Decimal::ZERO);
        assert!(beyond.interest > Decimal::ZERO);
    }

    #[test]
    fn test_early_payment_discount() {
        let policy = InterestPolicy::builder()
            .early_discount_rate(dec!(0.0005))
            .build()
            .unwrap();

        let inst = installment(dec!(1000), date(2025, 3, 10));
        let accrual = accrue(&inst, date(2025, 3, 5), &policy).unwrap();

        // 1000 * 0.0005 * 5 days early
        assert_eq!(accrual.discount, dec!(2.50));
        assert_eq!(accrual.penalty, dec!(0));
        assert_eq!(accrual.interest, dec!(0));
    }

    #[test]
    fn test_discount_capped_at_amount() {
        let policy = InterestPolicy::builder()
            .early_discount_rate(dec!(0.01))
            .build()
            .unwrap();

        let inst = installment(dec!(100), date(2025, 12, 31));
        // 200 days early at 1%/day would exceed the amount
        let accrual = accrue(&inst, date(2025, 6, 14), &policy).unwrap();

        assert_eq!(accrual.discount, dec!(100));
        assert!(accrual.amount_due(dec!(100)) >= Decimal::ZERO);
    }

    #[test]
    fn test_no_discount_without_rate() {
        let inst = installment(dec!(1000), date(2025, 3, 10));
        let accrual = accrue(&inst, date(2025, 3, 1), &simple_policy()).unwrap();
        assert_eq!(accrual, Accrual::zero());
    }

    #[test]
    fn test_compound_interest() {
        let policy = InterestPolicy::builder()
            .tier(1, dec!(0.001))
            .accrual_model(AccrualModel::Compound)
            .build()
            .unwrap();

        let inst = installment(dec!(1000), date(2025, 3, 10));
        let accrual = accrue(&inst, date(2025, 3, 20), &policy).unwrap();

        // 1000 * (1.001^10 - 1) = 10.0451... -> 10.05
        assert_eq!(accrual.interest, dec!(10.05));
    }

    #[test]
    fn test_tier_escalation() {
        let policy = InterestPolicy::builder()
            .tier(1, dec!(0.001))
            .tier(30, dec!(0.002))
            .build()
            .unwrap();

        let inst = installment(dec!(1000), date(2025, 1, 1));

        // 29 days late: first tier
        let a29 = accrue(&inst, date(2025, 1, 30), &policy).unwrap();
        assert_eq!(a29.interest, dec!(29.00));

        // 30 days late: second tier applies to all billable days
        let a30 = accrue(&inst, date(2025, 1, 31), &policy).unwrap();
        assert_eq!(a30.interest, dec!(60.00));
    }

    #[test]
    fn test_tier_gap_surfaces() {
        let policy = InterestPolicy::builder().tier(10, dec!(0.001)).build().unwrap();

        let inst = installment(dec!(1000), date(2025, 3, 10));
        let err = accrue(&inst, date(2025, 3, 15), &policy).unwrap_err();
        assert_eq!(err, crate::error::EngineError::PolicyTierGap { days_late: 5 });
    }

    #[test]
    fn test_rate_change_splits_simple_interest() {
        // Rate switches from 0.001 to 0.002 effective Mar 16: 6 days at
        // the old rate (Mar 10..16) and 4 at the new (Mar 16..20)
        let policy = InterestPolicy::builder()
            .tier(1, dec!(0.001))
            .rate_change(date(2025, 3, 16), dec!(0.002))
            .build()
            .unwrap();

        let inst = installment(dec!(1000), date(2025, 3, 10));
        let accrual = accrue(&inst, date(2025, 3, 20), &policy).unwrap();

        assert_eq!(accrual.interest, dec!(6.00) + dec!(8.00));
    }

    #[test]
    fn test_rate_change_compounds_forward() {
        let policy = InterestPolicy::builder()
            .tier(1, dec!(0.001))
            .accrual_model(AccrualModel::Compound)
            .rate_change(date(2025, 3, 16), dec!(0.002))
            .build()
            .unwrap();

        let inst = installment(dec!(1000), date(2025, 3, 10));
        let accrual = accrue(&inst, date(2025, 3, 20), &policy).unwrap();

        // 1000 * 1.001^6 * 1.002^4 - 1000 = 14.0873... -> 14.09
        assert_eq!(accrual.interest, dec!(14.09));
    }

    #[test]
    fn test_rate_change_before_window_overrides_opening_rate() {
        let policy = InterestPolicy::builder()
            .tier(1, dec!(0.001))
            .rate_change(date(2025, 1, 1), dec!(0.003))
            .build()
            .unwrap();

        let inst = installment(dec!(1000), date(2025, 3, 10));
        let accrual = accrue(&inst, date(2025, 3, 20), &policy).unwrap();

        assert_eq!(accrual.interest, dec!(30.00));
    }

    #[test]
    fn test_interest_monotonic_in_days_late() {
        let policy = InterestPolicy::builder()
            .tier(1, dec!(0.001))
            .tier(30, dec!(0.0015))
            .tolerance_days(3)
            .build()
            .unwrap();

        let inst = installment(dec!(1000), date(2025, 1, 1));
        let mut previous = Decimal::MIN;
        for days in 0i64..120 {
            let accrual = accrue(&inst, date(2025, 1, 1).add_days(days), &policy).unwrap();
            assert!(
                accrual.interest >= previous,
                "interest decreased at {days} days late"
            );
            previous = accrual.interest;
        }
    }
}
