use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One row per user; created on first profile save, never hard-deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub name: String,
    pub sex: String,
    pub city: String,
    pub current_employer: String,
    pub current_job_title: String,
    pub years_of_employment: Option<i32>,
    pub linkedin_url: Option<String>,
    pub resume_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Dates are free text on purpose — resumes say "Jan 2020", "2020", or
/// "Present"; the sentinel `"Present"` marks an ongoing position.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentRow {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub company: String,
    pub job_title: String,
    pub start_date: String,
    pub end_date: String,
    pub city: String,
    pub description: String,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AccreditationRow {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    pub institute: String,
    pub location: String,
    pub year: String,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}
