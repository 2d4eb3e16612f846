use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted resume: one row in `resumes`, with the structured form
/// payload embedded as JSONB. Owned by the storage layer; the render
/// pipeline only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRecord {
    pub id: Uuid,
    pub title: String,
    pub user_id: Option<Uuid>,
    pub data: Json<ResumeData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The structured resume payload filled out by the form.
///
/// Every list field may be absent or empty: absent lists render as empty
/// sections, never as errors. Dates are free-form display strings
/// ("2020-01", "Present") and are never parsed as calendar values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeData {
    pub name: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub work_experience_list: Vec<WorkExperience>,
    #[serde(default)]
    pub side_project_list: Vec<SideProject>,
    #[serde(default)]
    pub education_experience_list: Vec<EducationExperience>,
    #[serde(default)]
    pub skills_list: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    pub title: String,
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SideProject {
    pub project_name: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationExperience {
    pub school: String,
    pub degree: String,
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}
