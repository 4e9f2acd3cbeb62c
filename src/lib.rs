//! Customer API: CRUD REST service for customer records.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreBackend};
pub use error::{AppError, ApplicationError, ConfigError};
pub use model::Customer;
pub use routes::{build_router, common_routes, customer_routes};
pub use service::CustomerService;
pub use state::AppState;
pub use store::{ensure_database_exists, CustomerStore, MemoryCustomerStore, PgCustomerStore};
