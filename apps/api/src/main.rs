mod analysis;
mod config;
mod errors;
mod generation;
mod ingest;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ingest::fetch::JobPageFetcher;
use crate::llm_client::{LlmClient, SharedModel};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client only when a key is configured
    let llm: Option<SharedModel> = match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.llm_timeout())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client) as SharedModel)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; using rule-based analysis and template synthesis");
            None
        }
    };

    // Initialize job page fetcher
    let fetcher = JobPageFetcher::new(config.fetch_timeout())?;

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm,
        fetcher,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
