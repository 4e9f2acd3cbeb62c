//! Customer operations over a [`CustomerStore`]. Adds the not-found translation for single reads.

use crate::error::AppError;
use crate::model::Customer;
use crate::store::CustomerStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        CustomerService { store }
    }

    pub async fn add_customer(&self, customer: Customer) -> Result<Customer, AppError> {
        self.store.save(customer).await
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        self.store.find_all().await
    }

    /// Fetch one customer; a missing id is [`AppError::CustomerNotFound`].
    pub async fn get_customer(&self, customer_id: i32) -> Result<Customer, AppError> {
        self.store
            .find_by_id(customer_id)
            .await?
            .ok_or_else(AppError::customer_not_found)
    }

    /// Full replacement at `customer_id`; the path id overrides any id in the payload.
    /// Saving an unknown id creates the record.
    pub async fn update_customer(&self, customer_id: i32, customer: Customer) -> Result<Customer, AppError> {
        self.store.save(customer.with_id(customer_id)).await
    }

    pub async fn delete_customer(&self, customer_id: i32) -> Result<(), AppError> {
        self.store.delete_by_id(customer_id).await
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }
}
