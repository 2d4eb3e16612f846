pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::logs::handlers as logs;
use crate::render::handlers as render;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .patch(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        // Work log API
        .route(
            "/api/v1/logs",
            get(logs::handle_list_logs).post(logs::handle_create_log),
        )
        // Bullet generation API
        .route("/api/v1/generate", post(generation::handle_generate))
        // PDF preview (binary response, id as query parameter)
        .route("/api/v1/preview", get(render::handle_preview))
        .with_state(state)
}
