//! CustomerService: delegation to the store with not-found translation.

mod customer;
pub use customer::CustomerService;
