//! Menu item API module
//!
//! Catalog mutations, all behind the subscription gate. Customer-facing
//! reads live under /api/restaurants/{id}/menu.

mod handler;

use axum::{
    Router,
    routing::{patch, post},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/menu-items", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", patch(handler::update).delete(handler::delete))
}
