mod admin;
mod analysis;
mod config;
mod db;
mod errors;
mod interview;
mod llm_client;
mod models;
mod routes;
mod speech;
mod state;
mod taxonomy;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::interview::backchannel::BackchannelPolicy;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::speech::stt::DeepgramClient;
use crate::speech::tts::ElevenLabsClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coach API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(&config.llm)?;
    info!("LLM client initialized (model: {})", llm.model());

    // Initialize speech providers
    let tts = Arc::new(ElevenLabsClient::new(&config.tts)?);
    let stt = Arc::new(DeepgramClient::new(&config.stt)?);
    info!(
        "Speech clients initialized (voice: {}, stt model: {})",
        config.tts.voice_id, config.stt.model
    );

    if config.admin_api_token.is_none() {
        info!("ADMIN_API_TOKEN not set; admin routes are disabled");
    }

    // Build app state
    let state = AppState {
        db,
        llm,
        tts,
        stt,
        backchannel: BackchannelPolicy::default(),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the web app domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
