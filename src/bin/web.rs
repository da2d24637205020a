use anyhow::{Context, Result};
use rundown_adapter::api::TheRundownClient;
use rundown_adapter::server::{router, AppState};
use rundown_adapter::Config;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    rundown_adapter::init_tracing();

    // Configuration errors (e.g. unknown sport ids) stop the process here
    let config = Config::from_env().context("Failed to load configuration")?;
    let api_key = config
        .api_key
        .clone()
        .context("THERUNDOWN_API_KEY not set in environment or .env file")?;

    let client = TheRundownClient::new(api_key, config.api_url.clone());
    let bind_addr = config.bind_addr.clone();

    let state = Arc::new(AppState {
        source: Arc::new(client),
        config: Arc::new(config),
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!("adapter listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
