//! Composed competence-assessment report.
//!
//! One fetch returns everything the print view renders: profile fields,
//! ordered employment history, ordered accreditations, and the selected
//! skill profile.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::sessions::AuthUser;
use crate::errors::AppError;
use crate::models::profile::{AccreditationRow, EmploymentRow, ProfileRow};
use crate::models::skills::SkillProfileRow;
use crate::profile::handlers::{list_accreditations, list_employment};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub profile: ProfileRow,
    pub employment_history: Vec<EmploymentRow>,
    pub accreditations: Vec<AccreditationRow>,
    pub skill_profile: SkillProfileRow,
}

/// GET /api/v1/reports/:skill_profile_id
pub async fn handle_get_report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(skill_profile_id): Path<Uuid>,
) -> Result<Json<ReportResponse>, AppError> {
    let profile: Option<ProfileRow> = sqlx::query_as("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user.id)
        .fetch_optional(&state.db)
        .await?;
    let profile = profile.ok_or_else(|| {
        AppError::FailedPrecondition("Save your profile before generating a report".to_string())
    })?;

    let skill_profile: Option<SkillProfileRow> =
        sqlx::query_as("SELECT * FROM skill_profiles WHERE id = $1 AND user_id = $2")
            .bind(skill_profile_id)
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    let skill_profile = skill_profile.ok_or_else(|| {
        AppError::NotFound(format!("Skill profile {skill_profile_id} not found"))
    })?;

    Ok(Json(ReportResponse {
        employment_history: list_employment(&state.db, user.id).await?,
        accreditations: list_accreditations(&state.db, user.id).await?,
        profile,
        skill_profile,
    }))
}
