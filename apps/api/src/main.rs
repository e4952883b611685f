mod chat;
mod config;
mod errors;
mod llm_client;
mod mood;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OpenAiClient;
use crate::mood::store::MoodStore;
use crate::mood::trend::SvgTrendRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Solace API v{}", env!("CARGO_PKG_VERSION"));

    // Artifact directory for synthesized speech and trend charts
    tokio::fs::create_dir_all(&config.media_dir).await?;

    // Provider client behind the ModelClient seam
    let llm = Arc::new(OpenAiClient::new(config.openai_api_key.clone()));
    info!("Model client initialized");

    let mood = MoodStore::new(config.mood_log_path.clone());
    info!("Mood store backed by {}", config.mood_log_path.display());

    let trend = Arc::new(SvgTrendRenderer::new(config.media_dir.clone()));

    let state = AppState {
        llm,
        mood,
        trend,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
