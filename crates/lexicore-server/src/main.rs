//! LexiCore — project review server: PDF uploads plus AI-assisted Q&A.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use lexicore_server::routes;
use lexicore_server::state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("LEXICORE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = lexicore_core::LexiCoreConfig::from_env(&data_dir)?;
    let port = config.port;

    let client = lexicore_review::OpenRouterClient::from_env();
    info!("Completion model: {}", client.model());

    let state = Arc::new(AppState::new(config, client));

    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("LexiCore server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
