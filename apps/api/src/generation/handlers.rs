//! Axum route handler for the bullet-generation API.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::prompts::BULLET_SYSTEM;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub log_content: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub result: String,
}

/// POST /api/v1/generate
///
/// Turns a free-text work log into resume bullet points via the LLM.
/// The result is plain text for the user to edit; nothing is persisted
/// here.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if request.log_content.trim().is_empty() {
        return Err(AppError::Validation(
            "log_content cannot be empty".to_string(),
        ));
    }

    let prompt = format!("Work Log:\n{}", request.log_content);
    let response = state
        .llm
        .call(&prompt, BULLET_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    let result = response
        .text()
        .ok_or_else(|| AppError::Llm("completion contained no text".to_string()))?
        .to_string();

    Ok(Json(GenerateResponse { result }))
}
