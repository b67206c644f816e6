//! Binary entrypoint for the codeflow HTTP server.
//!
//! Reads configuration from environment variables, see
//! [`ServerConfig`](codeflow_server::config::ServerConfig) and
//! [`LlmConfig`](codeflow_assist::LlmConfig).

use codeflow_server::config::ServerConfig;
use codeflow_server::router::build_router;
use codeflow_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    let state = AppState::new(&config)?;
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(db = %config.db_path, tick_ms = config.tick.as_millis() as u64, "codeflow server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
