use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A free-text work log entry. Logs are the raw material the generation
/// endpoint turns into resume bullet points.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkLogRow {
    pub id: Uuid,
    pub content: String,
    pub user_id: Option<Uuid>,
    pub log_date: DateTime<Utc>,
}
