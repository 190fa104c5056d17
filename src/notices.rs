//! Contract expiry and payment-due notices
//!
//! Notices are derived from a lease and its ledger as of a date. Storing and
//! delivering them is left to the caller.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::LedgerConfig;
use crate::ledger::lease::ContractStatus;
use crate::ledger::month::MonthKey;
use crate::types::*;

/// Something a landlord should be told about a tenancy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    ContractExpiring {
        tenant_id: String,
        end_date: NaiveDate,
        days_left: i64,
    },
    PaymentDue {
        tenant_id: String,
        month: MonthKey,
        outstanding: BigDecimal,
    },
}

/// Collect notices for one lease
///
/// A contract expiry notice is raised when the end date is 1 to
/// `expiry_warning_days` days away. A payment-due notice is raised when the
/// as-of month has no payment and the ledger ends with a positive balance.
pub fn collect_notices(
    config: &LedgerConfig,
    lease: &Lease,
    ledger: &[LedgerRow],
    as_of: NaiveDate,
) -> Vec<Notice> {
    let mut notices = Vec::new();

    if let (Some(end_date), ContractStatus::ExpiringSoon { days_left }) = (
        lease.contract_end_date,
        lease.contract_status(as_of, config.expiry_warning_days),
    ) {
        if days_left > 0 {
            notices.push(Notice::ContractExpiring {
                tenant_id: lease.tenant_id.clone(),
                end_date,
                days_left,
            });
        }
    }

    let current = MonthKey::from_date(as_of);
    let zero = BigDecimal::from(0);
    if let Some(row) = ledger.iter().rev().find(|r| r.month_key == current) {
        let outstanding = ledger.last().map(|r| &r.balance).unwrap_or(&zero);
        if row.payment_total == zero && *outstanding > zero {
            notices.push(Notice::PaymentDue {
                tenant_id: lease.tenant_id.clone(),
                month: current,
                outstanding: outstanding.clone(),
            });
        }
    }

    if !notices.is_empty() {
        tracing::debug!(
            tenant_id = %lease.tenant_id,
            count = notices.len(),
            "collected tenancy notices"
        );
    }

    notices
}
