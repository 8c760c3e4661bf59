//! HTTP server loop

use shared::{AppError, AppResult};

use crate::api;
use crate::core::AppState;

/// Bind the configured address and serve until ctrl-c.
pub async fn run(state: AppState) -> AppResult<()> {
    let addr = format!("{}:{}", state.config.host, state.config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("tandoor-server listening on {}", addr);

    let app = api::create_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}
