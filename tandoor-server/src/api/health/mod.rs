//! Health check route
//!
//! | path        | method | auth |
//! |-------------|--------|------|
//! | /api/health | GET    | none |

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "tandoor-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}
