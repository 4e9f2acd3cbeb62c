//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message carried by [`AppError::CustomerNotFound`] for a missing customer.
pub const CUSTOMER_NOT_AVAILABLE: &str = "Customer record is not available...";

/// Wire code for a missing customer record.
pub const CUSTOMER_NOT_FOUND_CODE: i32 = 101;
/// Wire code for any other missing resource.
pub const NOT_FOUND_CODE: i32 = 201;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
    #[error("unknown store backend: '{0}' (expected postgres or memory)")]
    UnknownBackend(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    CustomerNotFound(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("storage: {0}")]
    Storage(String),
}

impl AppError {
    pub fn customer_not_found() -> Self {
        AppError::CustomerNotFound(CUSTOMER_NOT_AVAILABLE.into())
    }
}

/// Error envelope returned for domain errors. `code` is a domain code, not an HTTP status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationError {
    pub code: i32,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = match &self {
            AppError::CustomerNotFound(_) => CUSTOMER_NOT_FOUND_CODE,
            AppError::NotFound(_) => NOT_FOUND_CODE,
            AppError::Db(_) | AppError::Storage(_) => {
                tracing::error!(error = %self, "unhandled error");
                return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
            }
        };
        let body = ApplicationError {
            code,
            message: self.to_string(),
        };
        (StatusCode::NOT_FOUND, Json(body)).into_response()
    }
}
