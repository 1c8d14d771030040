mod assistant;
mod chat;
mod config;
mod db;
mod errors;
mod interview;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::IntentMatcher;
use crate::chat::sessions::SessionStore;
use crate::chat::typing::TypingDelay;
use crate::config::Config;
use crate::db::create_pool;
use crate::interview::coach::LlmInterviewCoach;
use crate::llm_client::LlmClient;
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

    info!("Starting StudentJobs API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (interview practice history)
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Keyword assistant: rule table is static, only the input bound is configurable
    let matcher = IntentMatcher::default().with_max_input_chars(config.chat_max_input_chars);
    let typing = TypingDelay::from_millis(config.chat_typing_min_ms, config.chat_typing_max_ms);
    info!(
        "Chat assistant ready: max {} chars, typing delay {}-{}ms",
        config.chat_max_input_chars, config.chat_typing_min_ms, config.chat_typing_max_ms
    );

    // Abandoned chat sessions are swept in the background
    let sessions = SessionStore::new();
    let _sweeper = sessions.spawn_idle_sweeper(
        Duration::from_secs(config.chat_session_idle_secs),
        Duration::from_secs(config.chat_session_sweep_secs),
    );
    info!(
        "Chat sessions expire after {}s idle (swept every {}s)",
        config.chat_session_idle_secs, config.chat_session_sweep_secs
    );

    // Build app state
    let state = AppState {
        db,
        matcher,
        sessions,
        typing,
        coach: Arc::new(LlmInterviewCoach(llm)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the StudentJobs frontend

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
