//! Cashflow projection and reconciliation.
//!
//! Buckets ledger entries into daily positions with running balances, and
//! resolves bank-statement divergence into synthetic adjustment entries.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use parcela_core::types::Date;

use crate::error::{EngineError, EngineResult};
use crate::types::{AdjustmentEntry, EntryKind, LedgerEntry};

/// One day's cashflow position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPosition {
    /// Bucket date.
    pub date: Date,
    /// Sum of receita amounts on the date.
    pub inflow: Decimal,
    /// Sum of despesa amounts on the date.
    pub outflow: Decimal,
    /// `inflow - outflow`.
    pub daily_balance: Decimal,
    /// Cumulative balance including the opening balance.
    pub running_balance: Decimal,
}

/// Projects ledger entries into daily positions over `[from, to]`.
///
/// Every day in the range is emitted, including days with no entries;
/// the running balance is seeded with the explicit `opening_balance`.
/// Entries outside the range are ignored.
///
/// # Errors
///
/// Returns `EngineError::InvalidDateRange` if `to` is before `from`.
pub fn project(
    entries: &[LedgerEntry],
    from: Date,
    to: Date,
    opening_balance: Decimal,
) -> EngineResult<Vec<DailyPosition>> {
    if to < from {
        return Err(EngineError::InvalidDateRange { from, to });
    }

    let mut buckets: BTreeMap<Date, (Decimal, Decimal)> = BTreeMap::new();
    for entry in entries {
        if entry.date < from || entry.date > to {
            continue;
        }
        let bucket = buckets.entry(entry.date).or_default();
        match entry.kind {
            EntryKind::Receita => bucket.0 += entry.amount,
            EntryKind::Despesa => bucket.1 += entry.amount,
        }
    }

    let mut positions = Vec::with_capacity(from.days_between(&to) as usize + 1);
    let mut running = opening_balance;
    let mut current = from;
    while current <= to {
        let (inflow, outflow) = buckets.get(&current).copied().unwrap_or_default();
        let daily_balance = inflow - outflow;
        running += daily_balance;
        positions.push(DailyPosition {
            date: current,
            inflow,
            outflow,
            daily_balance,
            running_balance: running,
        });
        current = current.add_days(1);
    }

    Ok(positions)
}

/// Resolves a divergence between the computed balance and a reconciled
/// bank-statement balance.
///
/// Emits one adjustment entry: receita if the statement is above the
/// computed balance, despesa if below, nothing if they agree.
#[must_use]
pub fn reconcile(
    computed_balance: Decimal,
    statement_balance: Decimal,
    as_of: Date,
) -> Option<AdjustmentEntry> {
    let divergence = statement_balance - computed_balance;
    if divergence.is_zero() {
        return None;
    }

    let kind = if divergence > Decimal::ZERO {
        EntryKind::Receita
    } else {
        EntryKind::Despesa
    };

    tracing::warn!(
        computed = %computed_balance,
        statement = %statement_balance,
        divergence = %divergence,
        "statement divergence, emitting adjustment"
    );

    Some(AdjustmentEntry {
        kind,
        amount: divergence.abs(),
        date: as_of,
        reason: format!(
            "statement balance {statement_balance} diverges from computed {computed_balance}"
        ),
    })
}

/// Net totals (receita minus despesa) grouped by an arbitrary key.
pub fn totals_by<K, F>(entries: &[LedgerEntry], key: F) -> BTreeMap<K, Decimal>
where
    K: Ord,
    F: Fn(&LedgerEntry) -> K,
{
    let mut totals = BTreeMap::new();
    for entry in entries {
        *totals.entry(key(entry)).or_default() += entry.signed_amount();
    }
    totals
}

/// Net totals grouped by category.
pub fn totals_by_category(entries: &[LedgerEntry]) -> BTreeMap<Option<String>, Decimal> {
    totals_by(entries, |e| e.category.clone())
}

/// Net totals grouped by cost center.
pub fn totals_by_cost_center(entries: &[LedgerEntry]) -> BTreeMap<Option<String>, Decimal> {
    totals_by(entries, |e| e.cost_center.clone())
}

/// Net totals grouped by account.
pub fn totals_by_account(entries: &[LedgerEntry]) -> BTreeMap<Option<String>, Decimal> {
    totals_by(entries, |e| e.account.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn entry(d: Date, amount: Decimal, kind: EntryKind) -> LedgerEntry {
        LedgerEntry::new(d, amount, kind, "test").unwrap()
    }

    #[test]
    fn test_project_daily_buckets() {
        let entries = vec![
            entry(date(2025, 1, 10), dec!(100.00), EntryKind::Receita),
            entry(date(2025, 1, 10), dec!(30.00), EntryKind::Despesa),
            entry(date(2025, 1, 12), dec!(50.00), EntryKind::Receita),
        ];

        let positions = project(&entries, date(2025, 1, 10), date(2025, 1, 12), dec!(0)).unwrap();

        assert_eq!(positions.len(), 3);

        assert_eq!(positions[0].inflow, dec!(100.00));
        assert_eq!(positions[0].outflow, dec!(30.00));
        assert_eq!(positions[0].daily_balance, dec!(70.00));
        assert_eq!(positions[0].running_balance, dec!(70.00));

        // Empty day still emitted
        assert_eq!(positions[1].daily_balance, dec!(0));
        assert_eq!(positions[1].running_balance, dec!(70.00));

        assert_eq!(positions[2].running_balance, dec!(120.00));
    }

    #[test]
    fn test_project_seeds_opening_balance() {
        let entries = vec![entry(date(2025, 1, 10), dec!(25.00), EntryKind::Despesa)];

        let positions =
            project(&entries, date(2025, 1, 10), date(2025, 1, 10), dec!(500.00)).unwrap();

        assert_eq!(positions[0].running_balance, dec!(475.00));
    }

    #[test]
    fn test_project_ignores_out_of_range_entries() {
        let entries = vec![
            entry(date(2025, 1, 5), dec!(999.00), EntryKind::Receita),
            entry(date(2025, 1, 10), dec!(10.00), EntryKind::Receita),
            entry(date(2025, 2, 1), dec!(999.00), EntryKind::Receita),
        ];

        let positions = project(&entries, date(2025, 1, 10), date(2025, 1, 11), dec!(0)).unwrap();

        assert_eq!(positions.last().unwrap().running_balance, dec!(10.00));
    }

    #[test]
    fn test_project_rejects_inverted_range() {
        let err = project(&[], date(2025, 1, 10), date(2025, 1, 9), dec!(0)).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidDateRange {
                from: date(2025, 1, 10),
                to: date(2025, 1, 9)
            }
        );
    }

    #[test]
    fn test_reconcile_positive_divergence() {
        let adj = reconcile(dec!(100.00), dec!(130.00), date(2025, 1, 31)).unwrap();
        assert_eq!(adj.kind, EntryKind::Receita);
        assert_eq!(adj.amount, dec!(30.00));
        assert_eq!(adj.date, date(2025, 1, 31));
    }

    #[test]
    fn test_reconcile_negative_divergence() {
        let adj = reconcile(dec!(100.00), dec!(80.00), date(2025, 1, 31)).unwrap();
        assert_eq!(adj.kind, EntryKind::Despesa);
        assert_eq!(adj.amount, dec!(20.00));
    }

    #[test]
    fn test_reconcile_no_divergence() {
        assert!(reconcile(dec!(100.00), dec!(100.00), date(2025, 1, 31)).is_none());
    }

    #[test]
    fn test_totals_by_category() {
        let entries = vec![
            entry(date(2025, 1, 10), dec!(100.00), EntryKind::Receita).with_category("sales"),
            entry(date(2025, 1, 11), dec!(40.00), EntryKind::Despesa).with_category("sales"),
            entry(date(2025, 1, 12), dec!(15.00), EntryKind::Despesa).with_category("rent"),
            entry(date(2025, 1, 13), dec!(5.00), EntryKind::Receita),
        ];

        let totals = totals_by_category(&entries);

        assert_eq!(totals[&Some("sales".to_string())], dec!(60.00));
        assert_eq!(totals[&Some("rent".to_string())], dec!(-15.00));
        assert_eq!(totals[&None], dec!(5.00));
    }

    #[test]
    fn test_totals_by_account() {
        let entries = vec![
            entry(date(2025, 1, 10), dec!(100.00), EntryKind::Receita).with_account("checking"),
            entry(date(2025, 1, 10), dec!(70.00), EntryKind::Despesa).with_account("checking"),
        ];

        let totals = totals_by_account(&entries);
        assert_eq!(totals[&Some("checking".to_string())], dec!(30.00));
    }
}
