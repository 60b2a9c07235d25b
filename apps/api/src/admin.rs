//! Admin usage report: one row per (user × skill profile), with a
//! profile-less row for users who have not created any.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::sessions::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminReportRow {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub city: String,
    pub profile_title: Option<String>,
    pub profile_created_at: Option<DateTime<Utc>>,
}

/// GET /api/v1/admin/report
pub async fn handle_admin_report(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<AdminReportRow>>, AppError> {
    if !state.config.is_admin(&user.id) {
        return Err(AppError::Forbidden);
    }

    let rows: Vec<AdminReportRow> = sqlx::query_as(
        r#"
        SELECT
            u.id AS user_id,
            u.email,
            COALESCE(p.name, '') AS name,
            COALESCE(p.city, '') AS city,
            sp.job_title AS profile_title,
            sp.created_at AS profile_created_at
        FROM users u
        LEFT JOIN profiles p ON p.user_id = u.id
        LEFT JOIN skill_profiles sp ON sp.user_id = u.id
        ORDER BY u.created_at, sp.created_at
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}
