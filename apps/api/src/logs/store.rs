//! sqlx adaptors for the `logs` table.
//!
//! Expected columns: id uuid primary key, content text, user_id uuid null,
//! log_date timestamptz defaulting to now().

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::log::WorkLogRow;

/// Returns all work logs, newest first.
pub async fn list_logs(pool: &PgPool) -> Result<Vec<WorkLogRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM logs ORDER BY log_date DESC")
        .fetch_all(pool)
        .await
}

pub async fn create_log(
    pool: &PgPool,
    content: &str,
    user_id: Option<Uuid>,
) -> Result<WorkLogRow, sqlx::Error> {
    sqlx::query_as("INSERT INTO logs (content, user_id) VALUES ($1, $2) RETURNING *")
        .bind(content)
        .bind(user_id)
        .fetch_one(pool)
        .await
}
