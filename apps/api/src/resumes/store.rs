//! sqlx adaptors for the `resumes` table.
//!
//! Expected columns: id uuid primary key, title text, user_id uuid null,
//! data jsonb, created_at / updated_at timestamptz defaulting to now().

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::{ResumeData, ResumeRecord};

/// Returns all resumes, most recently updated first.
pub async fn list_resumes(pool: &PgPool) -> Result<Vec<ResumeRecord>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM resumes ORDER BY updated_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn fetch_resume(pool: &PgPool, id: Uuid) -> Result<Option<ResumeRecord>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_resume(
    pool: &PgPool,
    title: &str,
    user_id: Option<Uuid>,
    data: &ResumeData,
) -> Result<ResumeRecord, sqlx::Error> {
    sqlx::query_as("INSERT INTO resumes (title, user_id, data) VALUES ($1, $2, $3) RETURNING *")
        .bind(title)
        .bind(user_id)
        .bind(Json(data))
        .fetch_one(pool)
        .await
}

/// Replaces the payload (and optionally the title), bumping `updated_at`.
/// Returns None when the id has no matching row.
pub async fn update_resume(
    pool: &PgPool,
    id: Uuid,
    title: Option<&str>,
    data: &ResumeData,
) -> Result<Option<ResumeRecord>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE resumes SET data = $2, title = COALESCE($3, title), updated_at = NOW() \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(Json(data))
    .bind(title)
    .fetch_optional(pool)
    .await
}

/// Returns true when a row was actually deleted.
pub async fn delete_resume(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
