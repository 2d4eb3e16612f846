mod config;
mod db;
mod errors;
mod generation;
mod llm_client;
mod logs;
mod models;
mod render;
mod resumes;
mod routes;
mod state;
mod template;

use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::render::pipeline::RenderPipeline;
use crate::render::spawn_stale_sweep;
use crate::routes::build_router;
use crate::state::AppState;

/// How often the janitor looks for crash-leaked render directories, and how
/// old a directory must be before it is reaped.
const JANITOR_SWEEP_EVERY: Duration = Duration::from_secs(300);
const JANITOR_MAX_AGE: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize the render pipeline
    let render = RenderPipeline::new(
        &config.pdflatex_path,
        config.render_timeout,
        &config.render_spool_dir,
    );
    info!(
        "Render pipeline initialized (compiler: {}, timeout: {:?}, spool: {})",
        config.pdflatex_path,
        config.render_timeout,
        config.render_spool_dir.display()
    );

    // Backstop for render directories leaked by a crash mid-render; normal
    // renders clean up after themselves.
    spawn_stale_sweep(
        config.render_spool_dir.clone(),
        JANITOR_SWEEP_EVERY,
        JANITOR_MAX_AGE,
    );

    // Build app state
    let state = AppState { db, llm, render };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
