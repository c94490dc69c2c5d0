// API Server Binary Entry Point
//
// Purpose: Serve the AVANI pages and the /recommend endpoint
// Usage: cargo run --bin api_server

use avani_crop_advisor::{AppState, ServerConfig, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "avani_crop_advisor=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let config = ServerConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  MODEL_DIR: {}", config.model_dir.display());
    tracing::info!("  STATIC_DIR: {}", config.static_dir.display());
    tracing::info!("  HOST: {}", config.host);
    tracing::info!("  PORT: {}", config.port);

    // Missing models degrade /recommend only; pages keep working
    let state = AppState::new(&config.model_dir, &config.static_dir);
    if !state.models_loaded() {
        tracing::warn!("Serving without ML models; /recommend will return errors");
    }

    let app = create_router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await?;

    Ok(())
}
