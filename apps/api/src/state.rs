use sqlx::PgPool;

use crate::llm_client::LlmClient;
use crate::render::pipeline::RenderPipeline;

/// Shared application state injected into all route handlers via Axum
/// extractors. Every client is constructed explicitly at startup; no
/// module-level globals.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub render: RenderPipeline,
}
