//! Order API module
//!
//! Creation and status transitions go through [`OrderManager`]; the
//! by-number lookup serves receipt/tracking pages.
//!
//! [`OrderManager`]: crate::orders::OrderManager

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}/status", patch(handler::update_status))
        .route("/by-number/{order_number}", get(handler::get_by_number))
}
