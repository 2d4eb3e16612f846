//! Axum route handlers for the Work Log API.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::logs::store;
use crate::models::log::WorkLogRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateLogRequest {
    pub content: String,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct LogListResponse {
    pub logs: Vec<WorkLogRow>,
}

/// GET /api/v1/logs
///
/// Lists all work logs, newest first.
pub async fn handle_list_logs(
    State(state): State<AppState>,
) -> Result<Json<LogListResponse>, AppError> {
    let logs = store::list_logs(&state.db).await?;
    Ok(Json(LogListResponse { logs }))
}

/// POST /api/v1/logs
pub async fn handle_create_log(
    State(state): State<AppState>,
    Json(request): Json<CreateLogRequest>,
) -> Result<Json<WorkLogRow>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let log = store::create_log(&state.db, &request.content, request.user_id).await?;
    Ok(Json(log))
}
