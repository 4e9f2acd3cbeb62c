//! Customer persistence: a keyed-record store over integer ids.

mod memory;
mod postgres;

pub use memory::MemoryCustomerStore;
pub use postgres::{ensure_database_exists, PgCustomerStore};

use crate::error::AppError;
use crate::model::Customer;
use async_trait::async_trait;

#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert when the id is absent or unknown, otherwise replace the stored record. Returns the stored record.
    async fn save(&self, customer: Customer) -> Result<Customer, AppError>;

    async fn find_by_id(&self, customer_id: i32) -> Result<Option<Customer>, AppError>;

    /// Every stored record. No ordering is guaranteed.
    async fn find_all(&self) -> Result<Vec<Customer>, AppError>;

    /// Remove the record if present; a missing id is a no-op.
    async fn delete_by_id(&self, customer_id: i32) -> Result<(), AppError>;

    /// Cheap round-trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}
