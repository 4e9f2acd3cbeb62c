//! Customer record: the single persisted entity.

use serde::{Deserialize, Serialize};

/// A customer row. `customer_id` is absent on create payloads and always set on stored records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub customer_id: Option<i32>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Customer {
    /// Pin the record to `customer_id`, replacing whatever id the payload carried.
    pub fn with_id(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }
}
