use std::sync::Arc;

use anyhow::Context;
use gemini_client::GeminiClient;
use visioncraft_api_server::{
    build_router,
    config::{LogSettings, ServerConfig},
    telemetry, AppState,
};
use visioncraft_core::{CredentialProvider, EnvCredentialProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = telemetry::init_tracing(&LogSettings::from_env());

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    let client = GeminiClient::with_config(config.gemini.clone())
        .context("failed to create Gemini client")?;

    let credentials = Arc::new(EnvCredentialProvider::new());
    if credentials.credential().is_none() {
        tracing::warn!("No server API key configured; requests must send x-api-key");
    }

    let state = AppState::new(Arc::new(client), credentials);
    let app = build_router(state, config.max_body_bytes);

    tracing::info!(
        gemini = %config.gemini.base_url,
        "Starting API server on {}",
        config.bind_addr
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
