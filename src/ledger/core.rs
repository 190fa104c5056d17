//! Rent ledger engine
//!
//! Rebuilds the monthly statement for one lease: one row per calendar month
//! from the lease start month through the as-of month, each carrying the
//! resolved rent, the payments attributed to that month and the running
//! balance.
//!
//! Rent for a month resolves with the precedence
//! override > end-month proration > start-month proration > baseline.
//! When the start and end months coincide the end-month formula applies and
//! the start day is ignored.

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::LedgerConfig;
use crate::ledger::month::MonthKey;
use crate::types::*;
use crate::utils::validation::{validate_monthly_rent, validate_non_negative_amount};

/// Which rule produced a month's rent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentSource {
    Override,
    ProratedStart,
    ProratedEnd,
    Baseline,
}

/// Rent charged for one month and the rule that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRent {
    pub amount: BigDecimal,
    pub source: RentSource,
}

/// Resolve the rent due for a single month of a lease
pub fn resolve_rent(lease: &Lease, month: MonthKey) -> ResolvedRent {
    if let Some(entry) = lease.rent_overrides.get(&month) {
        return ResolvedRent {
            amount: entry.amount.clone(),
            source: RentSource::Override,
        };
    }

    if lease.payment_type == PaymentType::Prorated {
        let days_in_month = month.days_in_month();

        if let Some(end) = lease
            .contract_end_date
            .filter(|_| lease.end_month() == Some(month))
        {
            return ResolvedRent {
                amount: prorate(&lease.monthly_rent, days_in_month, end.day()),
                source: RentSource::ProratedEnd,
            };
        }

        if month == lease.start_month() {
            let remaining = days_in_month - lease.start_date.day() + 1;
            return ResolvedRent {
                amount: prorate(&lease.monthly_rent, days_in_month, remaining),
                source: RentSource::ProratedStart,
            };
        }
    }

    ResolvedRent {
        amount: lease.monthly_rent.clone(),
        source: RentSource::Baseline,
    }
}

// Multiplying before dividing keeps whole-month charges exact.
fn prorate(monthly_rent: &BigDecimal, days_in_month: u32, days: u32) -> BigDecimal {
    monthly_rent * BigDecimal::from(days) / BigDecimal::from(days_in_month)
}

#[derive(Debug)]
struct PaymentGroup {
    total: BigDecimal,
    earliest: NaiveDate,
}

fn group_payments(payments: &[Payment]) -> BTreeMap<MonthKey, PaymentGroup> {
    let mut groups: BTreeMap<MonthKey, PaymentGroup> = BTreeMap::new();
    for payment in payments {
        groups
            .entry(payment.month_key())
            .and_modify(|group| {
                group.total += &payment.amount;
                if payment.date < group.earliest {
                    group.earliest = payment.date;
                }
            })
            .or_insert_with(|| PaymentGroup {
                total: payment.amount.clone(),
                earliest: payment.date,
            });
    }
    groups
}

/// Build the ledger with the default configuration
pub fn build_ledger(
    lease: &Lease,
    payments: &[Payment],
    as_of: NaiveDate,
) -> LedgerResult<Vec<LedgerRow>> {
    build_ledger_with(&LedgerConfig::default(), lease, payments, as_of)
}

/// Build the ledger through today's date (UTC)
pub fn build_ledger_today(lease: &Lease, payments: &[Payment]) -> LedgerResult<Vec<LedgerRow>> {
    build_ledger(lease, payments, chrono::Utc::now().date_naive())
}

/// Build the ledger from the lease start month through the month of `as_of`
///
/// Either every row is returned or an error is raised before any row is
/// produced. Payments attributed to months outside the iterated range do not
/// appear in the output.
pub fn build_ledger_with(
    config: &LedgerConfig,
    lease: &Lease,
    payments: &[Payment],
    as_of: NaiveDate,
) -> LedgerResult<Vec<LedgerRow>> {
    validate_monthly_rent(&lease.monthly_rent)?;
    for payment in payments {
        validate_non_negative_amount(&payment.amount).map_err(|_| {
            LedgerError::Validation(format!(
                "Payment {} has a negative amount: {}",
                payment.id, payment.amount
            ))
        })?;
    }
    if as_of < lease.start_date {
        return Err(LedgerError::InvalidRange {
            start: lease.start_date,
            as_of,
        });
    }

    let groups = group_payments(payments);
    let first = lease.start_month();
    let last = MonthKey::from_date(as_of);

    let mut rows = Vec::with_capacity(MonthKey::months_between(first, last));
    let mut balance = BigDecimal::from(0);

    for month in MonthKey::range(first, last) {
        let resolved = resolve_rent(lease, month);
        let note = match resolved.source {
            RentSource::Override => lease
                .rent_overrides
                .get(&month)
                .and_then(|entry| entry.note.clone()),
            RentSource::ProratedStart => Some(config.prorated_start_note.clone()),
            RentSource::ProratedEnd => Some(config.prorated_end_note.clone()),
            RentSource::Baseline => None,
        };

        let (payment_date, payment_total) = match groups.get(&month) {
            Some(group) => (Some(group.earliest), group.total.clone()),
            None => (None, BigDecimal::from(0)),
        };

        balance = &balance + &resolved.amount - &payment_total;

        tracing::trace!(
            month = %month,
            source = ?resolved.source,
            rent_due = %resolved.amount,
            paid = %payment_total,
            "resolved ledger month"
        );

        rows.push(LedgerRow {
            month_key: month,
            rent_due: resolved.amount,
            payment_date,
            payment_total,
            note,
            balance: balance.clone(),
        });
    }

    tracing::debug!(
        tenant_id = %lease.tenant_id,
        months = rows.len(),
        outstanding = %balance,
        "built rent ledger"
    );

    Ok(rows)
}

/// Totals derived from a tenant's ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub months: usize,
    pub total_rent_due: BigDecimal,
    pub total_paid: BigDecimal,
    /// Balance of the last row
    pub outstanding: BigDecimal,
    /// Months with rent due and no payment
    pub unpaid_months: Vec<MonthKey>,
}

impl LedgerSummary {
    /// Summarize a ledger produced by [`build_ledger`]
    pub fn from_rows(rows: &[LedgerRow]) -> Self {
        let zero = BigDecimal::from(0);
        Self {
            months: rows.len(),
            total_rent_due: rows.iter().map(|r| &r.rent_due).sum(),
            total_paid: rows.iter().map(|r| &r.payment_total).sum(),
            outstanding: rows
                .last()
                .map(|r| r.balance.clone())
                .unwrap_or_else(|| zero.clone()),
            unpaid_months: rows
                .iter()
                .filter(|r| r.payment_total == zero && r.rent_due > zero)
                .map(|r| r.month_key)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::overrides::RentOverride;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn prorated_lease(start: NaiveDate, rent: i64) -> Lease {
        let mut lease = Lease::new("t1".to_string(), start, BigDecimal::from(rent));
        lease.payment_type = PaymentType::Prorated;
        lease
    }

    fn payment(d: NaiveDate, amount: i64) -> Payment {
        Payment::new("t1".to_string(), d, BigDecimal::from(amount))
    }

    #[test]
    fn test_prorated_first_month() {
        let lease = prorated_lease(date(2024, 3, 15), 300000);
        let rows = build_ledger(&lease, &[], date(2024, 3, 15)).unwrap();

        let expected = BigDecimal::from(300000 * 17) / BigDecimal::from(31);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month_key, month("2024-03"));
        assert_eq!(rows[0].rent_due, expected);
        assert_eq!(rows[0].balance, expected);
        assert_eq!(rows[0].payment_date, None);
        assert_eq!(rows[0].payment_total, BigDecimal::from(0));
        assert_eq!(rows[0].note.as_deref(), Some("prorated-start"));
    }

    #[test]
    fn test_prorated_first_month_with_payment() {
        let lease = prorated_lease(date(2024, 3, 15), 300000);
        let payments = vec![payment(date(2024, 3, 20), 100000)];
        let rows = build_ledger(&lease, &payments, date(2024, 3, 15)).unwrap();

        let expected = BigDecimal::from(300000 * 17) / BigDecimal::from(31);
        assert_eq!(rows[0].payment_total, BigDecimal::from(100000));
        assert_eq!(rows[0].payment_date, Some(date(2024, 3, 20)));
        assert_eq!(rows[0].balance, expected - BigDecimal::from(100000));
    }

    #[test]
    fn test_start_on_first_and_last_day() {
        let lease = prorated_lease(date(2024, 4, 1), 300000);
        let rows = build_ledger(&lease, &[], date(2024, 4, 1)).unwrap();
        assert_eq!(rows[0].rent_due, BigDecimal::from(300000));

        let lease = prorated_lease(date(2024, 4, 30), 300000);
        let rows = build_ledger(&lease, &[], date(2024, 4, 30)).unwrap();
        assert_eq!(rows[0].rent_due, BigDecimal::from(10000));
    }

    #[test]
    fn test_override_replaces_rent_and_carries_note() {
        let mut lease = Lease::new("t1".to_string(), date(2024, 1, 10), BigDecimal::from(500000));
        lease.rent_overrides.insert(
            month("2024-06"),
            RentOverride::new(BigDecimal::from(450000), Some("discount".to_string())),
        );

        let rows = build_ledger(&lease, &[], date(2024, 9, 1)).unwrap();
        assert_eq!(rows.len(), 9);
        for row in &rows {
            if row.month_key == month("2024-06") {
                assert_eq!(row.rent_due, BigDecimal::from(450000));
                assert_eq!(row.note.as_deref(), Some("discount"));
            } else {
                assert_eq!(row.rent_due, BigDecimal::from(500000));
                assert_eq!(row.note, None);
            }
        }
    }

    #[test]
    fn test_override_wins_over_proration() {
        let mut lease = prorated_lease(date(2024, 3, 15), 300000);
        lease.contract_end_date = Some(date(2024, 5, 10));
        lease.rent_overrides.insert(
            month("2024-03"),
            RentOverride::new(BigDecimal::from(123), None),
        );
        lease.rent_overrides.insert(
            month("2024-05"),
            RentOverride::new(BigDecimal::from(456), Some("move-out".to_string())),
        );

        let rows = build_ledger(&lease, &[], date(2024, 5, 31)).unwrap();
        assert_eq!(rows[0].rent_due, BigDecimal::from(123));
        assert_eq!(rows[0].note, None);
        assert_eq!(rows[2].rent_due, BigDecimal::from(456));
        assert_eq!(rows[2].note.as_deref(), Some("move-out"));
    }

    #[test]
    fn test_prorated_end_month() {
        let mut lease = prorated_lease(date(2024, 1, 1), 290000);
        lease.contract_end_date = Some(date(2024, 2, 10));

        let rows = build_ledger(&lease, &[], date(2024, 4, 1)).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].rent_due, BigDecimal::from(290000));
        assert_eq!(rows[0].note.as_deref(), Some("prorated-start"));
        assert_eq!(rows[1].rent_due, BigDecimal::from(100000));
        assert_eq!(rows[1].note.as_deref(), Some("prorated-end"));
        // Billing continues at baseline after the contract end month.
        assert_eq!(rows[2].rent_due, BigDecimal::from(290000));
        assert_eq!(rows[3].rent_due, BigDecimal::from(290000));
    }

    #[test]
    fn test_same_start_and_end_month_uses_end_day() {
        let mut lease = prorated_lease(date(2024, 4, 20), 300000);
        lease.contract_end_date = Some(date(2024, 4, 25));

        let rows = build_ledger(&lease, &[], date(2024, 4, 30)).unwrap();
        assert_eq!(rows[0].rent_due, BigDecimal::from(250000));
        assert_eq!(rows[0].note.as_deref(), Some("prorated-end"));
    }

    #[test]
    fn test_full_payment_type_ignores_boundaries() {
        let mut lease = Lease::new("t1".to_string(), date(2024, 3, 15), BigDecimal::from(500000));
        lease.contract_end_date = Some(date(2024, 5, 3));

        let rows = build_ledger(&lease, &[], date(2024, 7, 1)).unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.rent_due == BigDecimal::from(500000)));
        assert!(rows.iter().all(|r| r.note.is_none()));
    }

    #[test]
    fn test_payments_grouped_per_month() {
        let lease = Lease::new("t1".to_string(), date(2024, 1, 5), BigDecimal::from(1000));
        let payments = vec![
            payment(date(2024, 2, 25), 300),
            payment(date(2024, 2, 3), 200),
            payment(date(2024, 1, 31), 1000),
            payment(date(2024, 2, 3), 0),
        ];

        let rows = build_ledger(&lease, &payments, date(2024, 2, 28)).unwrap();
        assert_eq!(rows[0].payment_total, BigDecimal::from(1000));
        assert_eq!(rows[0].balance, BigDecimal::from(0));
        assert_eq!(rows[1].payment_total, BigDecimal::from(500));
        assert_eq!(rows[1].payment_date, Some(date(2024, 2, 3)));
        assert_eq!(rows[1].balance, BigDecimal::from(500));
    }

    #[test]
    fn test_payments_outside_range_are_excluded() {
        let lease = Lease::new("t1".to_string(), date(2024, 3, 1), BigDecimal::from(1000));
        let payments = vec![
            payment(date(2024, 2, 28), 700),
            payment(date(2024, 3, 2), 1000),
            payment(date(2024, 5, 1), 900),
        ];

        let rows = build_ledger(&lease, &payments, date(2024, 4, 15)).unwrap();
        let paid: BigDecimal = rows.iter().map(|r| &r.payment_total).sum();
        assert_eq!(paid, BigDecimal::from(1000));
        assert_eq!(rows.last().unwrap().balance, BigDecimal::from(1000));
    }

    #[test]
    fn test_override_outside_range_is_inert() {
        let mut lease = Lease::new("t1".to_string(), date(2024, 3, 1), BigDecimal::from(1000));
        lease.rent_overrides.insert(month("2023-12"), RentOverride::new(BigDecimal::from(1), None));
        lease.rent_overrides.insert(month("2030-01"), RentOverride::new(BigDecimal::from(1), None));

        let rows = build_ledger(&lease, &[], date(2024, 4, 1)).unwrap();
        assert!(rows.iter().all(|r| r.rent_due == BigDecimal::from(1000)));
    }

    #[test]
    fn test_balance_recurrence_and_contiguity() {
        let mut lease = prorated_lease(date(2023, 11, 7), 333333);
        lease.contract_end_date = Some(date(2024, 8, 19));
        let payments = vec![
            payment(date(2023, 11, 30), 250000),
            payment(date(2024, 1, 2), 333333),
            payment(date(2024, 3, 9), 700000),
        ];

        let rows = build_ledger(&lease, &payments, date(2024, 10, 2)).unwrap();
        assert_eq!(
            rows.len(),
            MonthKey::months_between(month("2023-11"), month("2024-10"))
        );

        let mut previous = BigDecimal::from(0);
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                assert_eq!(row.month_key, rows[i - 1].month_key.next());
            }
            assert_eq!(row.balance, &previous + &row.rent_due - &row.payment_total);
            previous = row.balance.clone();
        }
    }

    #[test]
    fn test_as_of_before_start_is_invalid_range() {
        let lease = Lease::new("t1".to_string(), date(2024, 3, 15), BigDecimal::from(1000));
        let result = build_ledger(&lease, &[], date(2024, 3, 14));
        assert!(matches!(result, Err(LedgerError::InvalidRange { .. })));
    }

    #[test]
    fn test_invalid_rent_and_payment_rejected() {
        let lease = Lease::new("t1".to_string(), date(2024, 3, 1), BigDecimal::from(-10));
        assert!(matches!(
            build_ledger(&lease, &[], date(2024, 4, 1)),
            Err(LedgerError::Validation(_))
        ));

        let lease = Lease::new("t1".to_string(), date(2024, 3, 1), BigDecimal::from(10));
        let payments = vec![payment(date(2024, 3, 2), -1)];
        assert!(matches!(
            build_ledger(&lease, &payments, date(2024, 4, 1)),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn test_custom_note_markers() {
        let config = LedgerConfig {
            prorated_start_note: "partial first month".to_string(),
            ..LedgerConfig::default()
        };
        let lease = prorated_lease(date(2024, 3, 15), 300000);
        let rows = build_ledger_with(&config, &lease, &[], date(2024, 4, 1)).unwrap();

        assert_eq!(rows[0].note.as_deref(), Some("partial first month"));
        assert_eq!(rows[1].note, None);
    }

    #[test]
    fn test_build_ledger_today_runs_through_current_month() {
        let lease = Lease::new("t1".to_string(), date(2020, 1, 15), BigDecimal::from(1000));
        let rows = build_ledger_today(&lease, &[]).unwrap();

        let today = chrono::Utc::now().date_naive();
        assert_eq!(rows.first().unwrap().month_key, month("2020-01"));
        assert_eq!(rows.last().unwrap().month_key, MonthKey::from_date(today));
        assert_eq!(
            rows.len(),
            MonthKey::months_between(month("2020-01"), MonthKey::from_date(today))
        );
    }

    #[test]
    fn test_summary() {
        let lease = Lease::new("t1".to_string(), date(2024, 1, 1), BigDecimal::from(1000));
        let payments = vec![payment(date(2024, 1, 3), 1000), payment(date(2024, 3, 3), 400)];
        let rows = build_ledger(&lease, &payments, date(2024, 3, 31)).unwrap();

        let summary = LedgerSummary::from_rows(&rows);
        assert_eq!(summary.months, 3);
        assert_eq!(summary.total_rent_due, BigDecimal::from(3000));
        assert_eq!(summary.total_paid, BigDecimal::from(1400));
        assert_eq!(summary.outstanding, BigDecimal::from(1600));
        assert_eq!(summary.unpaid_months, vec![month("2024-02")]);

        let empty = LedgerSummary::from_rows(&[]);
        assert_eq!(empty.outstanding, BigDecimal::from(0));
    }
}
