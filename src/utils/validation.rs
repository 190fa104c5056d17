//! Validation utilities

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::types::*;

/// Validate that a monthly rent is strictly positive
pub fn validate_monthly_rent(amount: &BigDecimal) -> LedgerResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(LedgerError::Validation(format!(
            "Monthly rent must be positive, got {amount}"
        )))
    } else {
        Ok(())
    }
}

/// Validate that a payment or override amount is zero or positive
pub fn validate_non_negative_amount(amount: &BigDecimal) -> LedgerResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(LedgerError::Validation(format!(
            "Amount cannot be negative, got {amount}"
        )))
    } else {
        Ok(())
    }
}

/// Validate that a tenant ID is usable as a storage key
pub fn validate_tenant_id(tenant_id: &str) -> LedgerResult<()> {
    if tenant_id.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Tenant ID cannot be empty".to_string(),
        ));
    }

    if tenant_id.len() > 64 {
        return Err(LedgerError::Validation(
            "Tenant ID cannot exceed 64 characters".to_string(),
        ));
    }

    Ok(())
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| LedgerError::Validation(format!("Malformed date '{value}': {e}")))
}

/// Validate the lease fields the engine relies on
pub fn validate_lease(lease: &Lease) -> LedgerResult<()> {
    validate_tenant_id(&lease.tenant_id)?;
    validate_monthly_rent(&lease.monthly_rent)?;

    for (month, entry) in lease.rent_overrides.iter() {
        validate_non_negative_amount(&entry.amount).map_err(|_| {
            LedgerError::Validation(format!(
                "Rent override for {month} cannot be negative, got {}",
                entry.amount
            ))
        })?;
    }

    Ok(())
}
