//! In-memory store with the same save/delete semantics as the PostgreSQL table.

use super::CustomerStore;
use crate::error::AppError;
use crate::model::Customer;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Inner {
    rows: BTreeMap<i32, Customer>,
    /// Next generated id; always greater than every stored id. `None` once ids are exhausted.
    next_id: Option<i32>,
}

pub struct MemoryCustomerStore {
    inner: RwLock<Inner>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        MemoryCustomerStore {
            inner: RwLock::new(Inner {
                rows: BTreeMap::new(),
                next_id: Some(1),
            }),
        }
    }
}

impl Default for MemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn save(&self, customer: Customer) -> Result<Customer, AppError> {
        let mut inner = self.inner.write().await;
        let id = match customer.customer_id {
            Some(id) => id,
            None => inner
                .next_id
                .ok_or_else(|| AppError::Storage("customer ids exhausted".into()))?,
        };
        inner.next_id = match (inner.next_id, id.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
        let stored = customer.with_id(id);
        inner.rows.insert(id, stored.clone());
        tracing::debug!(customer_id = id, "saved customer (memory)");
        Ok(stored)
    }

    async fn find_by_id(&self, customer_id: i32) -> Result<Option<Customer>, AppError> {
        Ok(self.inner.read().await.rows.get(&customer_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn delete_by_id(&self, customer_id: i32) -> Result<(), AppError> {
        self.inner.write().await.rows.remove(&customer_id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
