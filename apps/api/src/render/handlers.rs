//! Axum route handler for the PDF preview endpoint.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resumes::store::fetch_resume;
use crate::state::AppState;
use crate::template::compose_resume;

#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    pub id: Option<String>,
}

/// GET /api/v1/preview?id=<resume id>
///
/// Renders the stored resume to PDF and streams it back inline. The
/// artifact is built fresh per request and never cached or persisted.
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(params): Query<PreviewParams>,
) -> Result<Response, AppError> {
    let id = params
        .id
        .as_deref()
        .ok_or_else(|| AppError::Validation("id query parameter is required".to_string()))?;
    let id = Uuid::parse_str(id)
        .map_err(|_| AppError::Validation("id must be a valid resume id".to_string()))?;

    let resume = fetch_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let source = compose_resume(&resume.data);
    let pdf = state.render.render(&source, id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "inline; filename=\"resume.pdf\"",
            ),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}
