//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::*;
use crate::utils::validation::{validate_lease, validate_non_negative_amount};

/// Storage abstraction for leases and payments
///
/// The engine never queries storage itself; [`crate::RentBook`] loads the
/// inputs through this trait and hands snapshots to the engine. Implement it
/// for whatever backend holds tenant records.
#[async_trait]
pub trait TenancyStorage: Send + Sync {
    /// Save or replace the lease for a tenant
    async fn save_lease(&mut self, lease: &Lease) -> LedgerResult<()>;

    /// Get the lease for a tenant
    async fn get_lease(&self, tenant_id: &str) -> LedgerResult<Option<Lease>>;

    /// List all leases
    async fn list_leases(&self) -> LedgerResult<Vec<Lease>>;

    /// Save a payment
    async fn save_payment(&mut self, payment: &Payment) -> LedgerResult<()>;

    /// List payments for a tenant, optionally bounded by date (inclusive)
    async fn get_payments(
        &self,
        tenant_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<Payment>>;

    /// Delete a payment by ID
    async fn delete_payment(&mut self, payment_id: &str) -> LedgerResult<()>;
}

/// Trait for implementing custom lease and payment validation rules
pub trait LeaseValidator: Send + Sync {
    /// Validate a lease before saving
    fn validate_lease(&self, lease: &Lease) -> LedgerResult<()>;

    /// Validate a payment before saving
    fn validate_payment(&self, payment: &Payment) -> LedgerResult<()>;
}

/// Default validator: positive rent, non-negative amounts
pub struct DefaultLeaseValidator;

impl LeaseValidator for DefaultLeaseValidator {
    fn validate_lease(&self, lease: &Lease) -> LedgerResult<()> {
        validate_lease(lease)
    }

    fn validate_payment(&self, payment: &Payment) -> LedgerResult<()> {
        if payment.tenant_id.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Payment must reference a tenant".to_string(),
            ));
        }
        validate_non_negative_amount(&payment.amount)
    }
}
