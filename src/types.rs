//! Core types and data structures for the rent ledger

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::month::MonthKey;
use crate::ledger::overrides::RentOverrides;

/// How partial months at the lease boundaries are charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Full monthly rent every month, including partial first and last months
    #[default]
    Full,
    /// Day-weighted rent for the first month and for the contract end month
    Prorated,
}

/// Tenancy terms driving the monthly charge computation for one tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lease {
    /// Identifier of the tenant holding this lease
    pub tenant_id: String,
    /// First day of the tenancy
    pub start_date: NaiveDate,
    /// Baseline rent for any month without an override
    #[serde(deserialize_with = "crate::utils::decimal::deserialize")]
    pub monthly_rent: BigDecimal,
    /// Proration policy
    #[serde(default)]
    pub payment_type: PaymentType,
    /// Optional contract end date; the ledger still runs through the as-of month
    #[serde(default)]
    pub contract_end_date: Option<NaiveDate>,
    /// Month-specific rent overrides
    #[serde(default)]
    pub rent_overrides: RentOverrides,
}

impl Lease {
    /// Create a lease with full-month billing, no end date and no overrides
    pub fn new(tenant_id: String, start_date: NaiveDate, monthly_rent: BigDecimal) -> Self {
        Self {
            tenant_id,
            start_date,
            monthly_rent,
            payment_type: PaymentType::Full,
            contract_end_date: None,
            rent_overrides: RentOverrides::new(),
        }
    }

    /// Month containing the lease start
    pub fn start_month(&self) -> MonthKey {
        MonthKey::from_date(self.start_date)
    }

    /// Month containing the contract end, if any
    pub fn end_month(&self) -> Option<MonthKey> {
        self.contract_end_date.map(MonthKey::from_date)
    }
}

/// A rent payment received from a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for the payment
    pub id: String,
    /// Tenant the payment belongs to
    pub tenant_id: String,
    /// Date the payment is attributed to
    pub date: NaiveDate,
    /// Amount paid, zero or positive
    #[serde(deserialize_with = "crate::utils::decimal::deserialize")]
    pub amount: BigDecimal,
}

impl Payment {
    /// Create a payment with a freshly generated identifier
    pub fn new(tenant_id: String, date: NaiveDate, amount: BigDecimal) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tenant_id,
            date,
            amount,
        }
    }

    /// Month this payment is attributed to
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// One month of the statement: charge, matched payments and running balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Calendar month of this row
    pub month_key: MonthKey,
    /// Resolved charge for the month
    pub rent_due: BigDecimal,
    /// Earliest payment date within the month
    pub payment_date: Option<NaiveDate>,
    /// Sum of all payments attributed to the month
    pub payment_total: BigDecimal,
    /// Override note or proration marker
    pub note: Option<String>,
    /// Running balance after this month
    pub balance: BigDecimal,
}

/// Errors that can occur while building a rent ledger
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid range: as-of date {as_of} precedes lease start {start}")]
    InvalidRange { start: NaiveDate, as_of: NaiveDate },
    #[error("Tenant not found: {0}")]
    TenantNotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
