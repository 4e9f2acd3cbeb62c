//! Customer handlers: create, list, read, update, delete.

use crate::error::AppError;
use crate::model::Customer;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// POST /customers
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Customer>,
) -> Result<Json<Customer>, AppError> {
    let stored = state.customers.add_customer(body).await?;
    tracing::info!(customer_id = ?stored.customer_id, "customer created");
    Ok(Json(stored))
}

/// GET /customers
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(state.customers.list_customers().await?))
}

/// GET /customers/:customer_id
pub async fn read(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Json<Customer>, AppError> {
    Ok(Json(state.customers.get_customer(customer_id).await?))
}

/// PUT /customers/:customer_id. Full replacement; the path id wins over the body's.
pub async fn update(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    Json(body): Json<Customer>,
) -> Result<Json<Customer>, AppError> {
    if body.customer_id.is_some_and(|id| id != customer_id) {
        tracing::debug!(customer_id, body_id = ?body.customer_id, "ignoring payload id");
    }
    let stored = state.customers.update_customer(customer_id, body).await?;
    Ok(Json(stored))
}

/// DELETE /customers/:customer_id
pub async fn delete(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.customers.delete_customer(customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
