//! Rent book: loads tenancy records from storage and runs the ledger engine

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::config::LedgerConfig;
use crate::ledger::core::{build_ledger_with, LedgerSummary};
use crate::notices::{collect_notices, Notice};
use crate::traits::*;
use crate::types::*;

/// Orchestrates lease/payment storage and ledger generation per tenant
pub struct RentBook<S: TenancyStorage> {
    storage: S,
    config: LedgerConfig,
    validator: Box<dyn LeaseValidator>,
}

impl<S: TenancyStorage> RentBook<S> {
    /// Create a rent book with the default configuration and validator
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            config: LedgerConfig::default(),
            validator: Box::new(DefaultLeaseValidator),
        }
    }

    /// Replace the ledger configuration
    pub fn with_config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the lease/payment validator
    pub fn with_validator(mut self, validator: Box<dyn LeaseValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Validate and save a lease
    pub async fn save_lease(&mut self, lease: &Lease) -> LedgerResult<()> {
        self.validator.validate_lease(lease)?;
        self.storage.save_lease(lease).await
    }

    /// Get a lease, returning an error if the tenant is unknown
    pub async fn get_lease_required(&self, tenant_id: &str) -> LedgerResult<Lease> {
        self.storage
            .get_lease(tenant_id)
            .await?
            .ok_or_else(|| LedgerError::TenantNotFound(tenant_id.to_string()))
    }

    /// Record a payment for an existing tenant
    pub async fn record_payment(&mut self, payment: Payment) -> LedgerResult<()> {
        self.validator.validate_payment(&payment)?;
        self.get_lease_required(&payment.tenant_id).await?;

        self.storage.save_payment(&payment).await?;
        tracing::info!(
            tenant_id = %payment.tenant_id,
            payment_id = %payment.id,
            date = %payment.date,
            amount = %payment.amount,
            "recorded payment"
        );
        Ok(())
    }

    /// Set the rent for the month containing `date`
    pub async fn set_rent_override(
        &mut self,
        tenant_id: &str,
        date: NaiveDate,
        amount: BigDecimal,
        note: Option<String>,
    ) -> LedgerResult<Lease> {
        let lease = self
            .get_lease_required(tenant_id)
            .await?
            .with_rent_override(date, amount, note)?;

        self.save_lease(&lease).await?;
        tracing::info!(tenant_id, %date, "set rent override");
        Ok(lease)
    }

    /// Extend a tenant's contract by whole years
    pub async fn extend_contract(
        &mut self,
        tenant_id: &str,
        years: u32,
        apply_prorated: bool,
    ) -> LedgerResult<Lease> {
        let lease = self
            .get_lease_required(tenant_id)
            .await?
            .extend_contract(years, apply_prorated)?;

        self.save_lease(&lease).await?;
        tracing::info!(
            tenant_id,
            years,
            apply_prorated,
            end_date = ?lease.contract_end_date,
            "extended contract"
        );
        Ok(lease)
    }

    /// Build the ledger for a tenant through `as_of`
    pub async fn tenant_ledger(
        &self,
        tenant_id: &str,
        as_of: NaiveDate,
    ) -> LedgerResult<Vec<LedgerRow>> {
        let lease = self.get_lease_required(tenant_id).await?;
        let payments = self.storage.get_payments(tenant_id, None, None).await?;
        build_ledger_with(&self.config, &lease, &payments, as_of)
    }

    /// Summarize a tenant's ledger through `as_of`
    pub async fn tenant_summary(
        &self,
        tenant_id: &str,
        as_of: NaiveDate,
    ) -> LedgerResult<LedgerSummary> {
        let rows = self.tenant_ledger(tenant_id, as_of).await?;
        Ok(LedgerSummary::from_rows(&rows))
    }

    /// Contract expiry and payment-due notices for a tenant as of a date
    pub async fn tenant_notices(
        &self,
        tenant_id: &str,
        as_of: NaiveDate,
    ) -> LedgerResult<Vec<Notice>> {
        let lease = self.get_lease_required(tenant_id).await?;
        let payments = self.storage.get_payments(tenant_id, None, None).await?;
        let rows = build_ledger_with(&self.config, &lease, &payments, as_of)?;
        Ok(collect_notices(&self.config, &lease, &rows, as_of))
    }
}
