//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::AppResult;
use shared::models::{Order, OrderCreate, OrderUpdateStatus};

use crate::core::AppState;

/// POST /api/orders - place an order
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = state.orders.create(payload)?;
    Ok(Json(order))
}

/// PATCH /api/orders/{id}/status - move an order through the state machine
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdateStatus>,
) -> AppResult<Json<Order>> {
    let order = state.orders.transition(&id, payload.status)?;
    Ok(Json(order))
}

/// GET /api/orders/by-number/{order_number} - receipt lookup
pub async fn get_by_number(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get_by_number(&order_number)?;
    Ok(Json(order))
}
