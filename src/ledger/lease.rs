//! Lease construction and amendments

use bigdecimal::BigDecimal;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ledger::month::MonthKey;
use crate::ledger::overrides::RentOverride;
use crate::types::*;
use crate::utils::validation::{validate_lease, validate_non_negative_amount};

/// Where a lease stands relative to its contract end date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    /// No contract end date is set
    OpenEnded,
    Active { days_left: i64 },
    /// Ends within the warning window (or today)
    ExpiringSoon { days_left: i64 },
    Expired { days_ago: i64 },
}

impl Lease {
    /// Copy of this lease with an override for the month containing `date`
    ///
    /// Replaces any override already set for that month.
    pub fn with_rent_override(
        &self,
        date: NaiveDate,
        amount: BigDecimal,
        note: Option<String>,
    ) -> LedgerResult<Lease> {
        validate_non_negative_amount(&amount)?;

        let mut lease = self.clone();
        lease
            .rent_overrides
            .insert(MonthKey::from_date(date), RentOverride::new(amount, note));
        Ok(lease)
    }

    /// Copy of this lease with the contract extended by whole years
    ///
    /// Extends from the current end date, or from the start date when the
    /// lease is open-ended. Feb 29 clamps to Feb 28 in non-leap years. The
    /// payment type switches to `Prorated` when `apply_prorated` is set and to
    /// `Full` otherwise.
    pub fn extend_contract(&self, years: u32, apply_prorated: bool) -> LedgerResult<Lease> {
        if years == 0 {
            return Err(LedgerError::Validation(
                "Contract extension must be at least one year".to_string(),
            ));
        }

        let base = self.contract_end_date.unwrap_or(self.start_date);
        let new_end = base
            .checked_add_months(Months::new(years.saturating_mul(12)))
            .ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Extending {base} by {years} years is out of range"
                ))
            })?;

        let mut lease = self.clone();
        lease.contract_end_date = Some(new_end);
        lease.payment_type = if apply_prorated {
            PaymentType::Prorated
        } else {
            PaymentType::Full
        };
        Ok(lease)
    }

    /// Contract status as of a date, given a warning window in days
    pub fn contract_status(&self, as_of: NaiveDate, warning_days: i64) -> ContractStatus {
        let Some(end) = self.contract_end_date else {
            return ContractStatus::OpenEnded;
        };

        let days_left = (end - as_of).num_days();
        if days_left < 0 {
            ContractStatus::Expired {
                days_ago: -days_left,
            }
        } else if days_left <= warning_days {
            ContractStatus::ExpiringSoon { days_left }
        } else {
            ContractStatus::Active { days_left }
        }
    }
}

/// Builder for leases
#[derive(Debug)]
pub struct LeaseBuilder {
    lease: Lease,
}

impl LeaseBuilder {
    /// Start a full-month lease
    pub fn new(tenant_id: String, start_date: NaiveDate, monthly_rent: BigDecimal) -> Self {
        Self {
            lease: Lease::new(tenant_id, start_date, monthly_rent),
        }
    }

    pub fn payment_type(mut self, payment_type: PaymentType) -> Self {
        self.lease.payment_type = payment_type;
        self
    }

    /// Charge partial boundary months by day count
    pub fn prorated(self) -> Self {
        self.payment_type(PaymentType::Prorated)
    }

    pub fn contract_end(mut self, end_date: NaiveDate) -> Self {
        self.lease.contract_end_date = Some(end_date);
        self
    }

    pub fn rent_override(mut self, month: MonthKey, amount: BigDecimal, note: Option<String>) -> Self {
        self.lease
            .rent_overrides
            .insert(month, RentOverride::new(amount, note));
        self
    }

    /// Validate and build the lease
    pub fn build(self) -> LedgerResult<Lease> {
        validate_lease(&self.lease)?;

        if let Some(end) = self.lease.contract_end_date {
            if end < self.lease.start_date {
                return Err(LedgerError::Validation(format!(
                    "Contract end {end} precedes lease start {}",
                    self.lease.start_date
                )));
            }
        }

        Ok(self.lease)
    }
}
