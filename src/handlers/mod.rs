//! HTTP handlers for customer CRUD.

pub mod customer;
