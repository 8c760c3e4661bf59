use tandoor_server::{AppState, Config, core::server, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    // Keep the guard alive so buffered file logs flush on exit
    let _guard = init_logger_with_file(&config.log_level, config.log_dir.as_deref());

    tracing::info!(
        port = config.http_port,
        timezone = %config.timezone,
        "Starting tandoor-server"
    );

    let state = AppState::initialize(&config)?;

    if let Err(e) = server::run(state).await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
