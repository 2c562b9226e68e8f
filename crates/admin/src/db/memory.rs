//! Process-local cashier store.
//!
//! Records live in a `Vec` behind a `tokio::sync::Mutex`, so every insert
//! checks and writes under one lock and uniqueness holds under concurrency.
//! Nothing survives a restart.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use nature_core::{CashierField, CashierId};

use super::{CashierLookup, CashierStore, RepositoryError};
use crate::models::{Cashier, NewCashierRecord};

#[derive(Debug, Default)]
struct Inner {
    next_id: i32,
    records: Vec<Cashier>,
}

/// In-memory [`CashierStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryCashierStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryCashierStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.records.is_empty()
    }
}

/// Unique fields of `record` already held by some stored cashier.
fn conflicting_fields(records: &[Cashier], record: &NewCashierRecord) -> Vec<CashierField> {
    let taken = |field: CashierField| {
        records.iter().any(|c| match field {
            CashierField::UserName => c.user_name == record.user_name,
            CashierField::Mobile => c.mobile == record.cashier.mobile,
            CashierField::Aadhaar => c.aadhaar == record.cashier.aadhaar,
            CashierField::Email => c.email == record.cashier.email,
            _ => false,
        })
    };

    [
        CashierField::UserName,
        CashierField::Mobile,
        CashierField::Aadhaar,
        CashierField::Email,
    ]
    .into_iter()
    .filter(|f| taken(*f))
    .collect()
}

impl CashierStore for MemoryCashierStore {
    async fn find_one(&self, lookup: &CashierLookup) -> Result<Option<Cashier>, RepositoryError> {
        let inner = self.inner.lock().await;
        Ok(inner.records.iter().find(|c| lookup.matches(c)).cloned())
    }

    async fn find_matching(&self, lookup: &CashierLookup) -> Result<Vec<Cashier>, RepositoryError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .records
            .iter()
            .filter(|c| lookup.matches(c))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Cashier>, RepositoryError> {
        Ok(self.inner.lock().await.records.clone())
    }

    async fn insert(&self, record: NewCashierRecord) -> Result<Cashier, RepositoryError> {
        let mut inner = self.inner.lock().await;

        let conflicts = conflicting_fields(&inner.records, &record);
        if !conflicts.is_empty() {
            return Err(RepositoryError::Conflict(conflicts));
        }

        inner.next_id = inner
            .next_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::DataCorruption("cashier id overflow".to_owned()))?;

        let NewCashierRecord {
            cashier,
            user_name,
            password,
        } = record;

        let stored = Cashier {
            id: CashierId::new(inner.next_id),
            cashier_name: cashier.cashier_name,
            user_name,
            mobile: cashier.mobile,
            aadhaar: cashier.aadhaar,
            store_location: cashier.store_location,
            address: cashier.address,
            email: cashier.email,
            password,
            created_at: Utc::now(),
        };
        inner.records.push(stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: CashierId) -> Result<Option<Cashier>, RepositoryError> {
        let mut inner = self.inner.lock().await;
        let position = inner.records.iter().position(|c| c.id == id);
        Ok(position.map(|i| inner.records.remove(i)))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
