//! In-memory storage implementation for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    leases: Arc<RwLock<HashMap<String, Lease>>>,
    payments: Arc<RwLock<HashMap<String, Payment>>>,
}

fn read<T>(lock: &RwLock<T>) -> LedgerResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| LedgerError::Storage("memory storage lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> LedgerResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| LedgerError::Storage("memory storage lock poisoned".to_string()))
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            leases: Arc::new(RwLock::new(HashMap::new())),
            payments: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> LedgerResult<()> {
        write(&self.leases)?.clear();
        write(&self.payments)?.clear();
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TenancyStorage for MemoryStorage {
    async fn save_lease(&mut self, lease: &Lease) -> LedgerResult<()> {
        write(&self.leases)?.insert(lease.tenant_id.clone(), lease.clone());
        Ok(())
    }

    async fn get_lease(&self, tenant_id: &str) -> LedgerResult<Option<Lease>> {
        Ok(read(&self.leases)?.get(tenant_id).cloned())
    }

    async fn list_leases(&self) -> LedgerResult<Vec<Lease>> {
        let mut leases: Vec<Lease> = read(&self.leases)?.values().cloned().collect();
        leases.sort_by(|a, b| a.tenant_id.cmp(&b.tenant_id));
        Ok(leases)
    }

    async fn save_payment(&mut self, payment: &Payment) -> LedgerResult<()> {
        write(&self.payments)?.insert(payment.id.clone(), payment.clone());
        Ok(())
    }

    async fn get_payments(
        &self,
        tenant_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<Payment>> {
        let payments = read(&self.payments)?;
        let mut filtered: Vec<Payment> = payments
            .values()
            .filter(|payment| {
                if payment.tenant_id != tenant_id {
                    return false;
                }
                if let Some(start) = start_date {
                    if payment.date < start {
                        return false;
                    }
                }
                if let Some(end) = end_date {
                    if payment.date > end {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(filtered)
    }

    async fn delete_payment(&mut self, payment_id: &str) -> LedgerResult<()> {
        if write(&self.payments)?.remove(payment_id).is_some() {
            Ok(())
        } else {
            Err(LedgerError::Storage(format!(
                "Payment not found: {payment_id}"
            )))
        }
    }
}
