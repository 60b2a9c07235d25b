//! Axum route handlers for skill profiles: generation, editing, AI
//! validation of evidence, and proof-point summarization.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::types::Json as SqlJson;
use uuid::Uuid;

use crate::auth::sessions::AuthUser;
use crate::errors::AppError;
use crate::llm_client::repair::repair_json_array;
use crate::llm_client::ResponseFormat;
use crate::models::skills::SkillProfileRow;
use crate::skills::models::{rating_label, Skill, SupportLevel};
use crate::skills::prompts::{SKILL_GENERATION_PROMPT, SKILL_VALIDATION_PROMPT, SUMMARY_PROMPT};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkillProfileRequest {
    pub job_title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSkillProfileRequest {
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateSkillRequest {
    pub skill: Skill,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub all_proof_points: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Skill profile lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// Skill-list generation call shared by the bare endpoint and profile
/// creation: prompt → model → repair → parse.
async fn generate_skill_names(state: &AppState, job_title: &str) -> Result<Vec<String>, AppError> {
    let prompt = SKILL_GENERATION_PROMPT.replace("{job_title}", job_title);
    let output = state
        .llm
        .generate(&prompt, None, Vec::new(), ResponseFormat::Json)
        .await?;

    let repaired = repair_json_array(&output.text)?;
    let names: Vec<String> = serde_json::from_str(&repaired)
        .map_err(|e| AppError::ModelContract(format!("invalid skill list JSON: {e}")))?;
    Ok(names)
}

/// POST /api/v1/skills/generate
///
/// Returns the generated skill names for a job title without persisting
/// anything — a JSON array of strings.
pub async fn handle_generate_skills(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<CreateSkillProfileRequest>,
) -> Result<Json<Vec<String>>, AppError> {
    let job_title = request.job_title.trim();
    if job_title.is_empty() {
        return Err(AppError::Validation("Missing jobTitle".to_string()));
    }
    Ok(Json(generate_skill_names(&state, job_title).await?))
}

/// POST /api/v1/skill-profiles
///
/// Generates the skill list for a target job title and persists the new
/// profile. The generated list replaces nothing — each generation is its own
/// profile; an existing profile's list is only ever edited in place.
pub async fn handle_create_skill_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateSkillProfileRequest>,
) -> Result<Json<SkillProfileRow>, AppError> {
    let job_title = request.job_title.trim();
    if job_title.is_empty() {
        return Err(AppError::Validation(
            "Please enter a job title to generate skills".to_string(),
        ));
    }

    let names = generate_skill_names(&state, job_title).await?;
    let skills: Vec<Skill> = names
        .into_iter()
        .filter(|name| !name.trim().is_empty())
        .map(Skill::from_name)
        .collect();

    tracing::info!(
        "Generated {} skills for job title '{}' (user {})",
        skills.len(),
        job_title,
        user.id
    );

    let row: SkillProfileRow = sqlx::query_as(
        "INSERT INTO skill_profiles (user_id, job_title, skills) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(user.id)
    .bind(job_title)
    .bind(SqlJson(&skills))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/skill-profiles
pub async fn handle_list_skill_profiles(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<SkillProfileRow>>, AppError> {
    let rows: Vec<SkillProfileRow> = sqlx::query_as(
        "SELECT * FROM skill_profiles WHERE user_id = $1 ORDER BY created_at",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

/// GET /api/v1/skill-profiles/:id
pub async fn handle_get_skill_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SkillProfileRow>, AppError> {
    fetch_skill_profile(&state, user.id, id).await.map(Json)
}

/// PUT /api/v1/skill-profiles/:id
///
/// Saves an edited assessment: the full skill list plus the summary text.
/// Ratings are validated at this boundary — out-of-range values are
/// rejected, never clamped.
pub async fn handle_update_skill_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSkillProfileRequest>,
) -> Result<Json<SkillProfileRow>, AppError> {
    for skill in &request.skills {
        skill.validate().map_err(AppError::Validation)?;
    }

    let row: Option<SkillProfileRow> = sqlx::query_as(
        r#"
        UPDATE skill_profiles SET skills = $3, summary = $4, updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user.id)
    .bind(SqlJson(&request.skills))
    .bind(request.summary.trim())
    .fetch_optional(&state.db)
    .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Skill profile {id} not found")))
}

/// DELETE /api/v1/skill-profiles/:id
pub async fn handle_delete_skill_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    sqlx::query("DELETE FROM skill_profiles WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// AI validation & summary
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skills/validate
///
/// Classifies a skill's self-rating against its evidence and returns the
/// support level as a bare JSON string — one of the three wire literals.
/// Pure with respect to storage: the caller merges the returned level into
/// the profile on its next save.
pub async fn handle_validate_skill(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<ValidateSkillRequest>,
) -> Result<Json<SupportLevel>, AppError> {
    let skill = &request.skill;
    skill.validate().map_err(AppError::Validation)?;

    let certifications = serde_json::to_string(&skill.certifications)
        .map_err(|e| AppError::Internal(e.into()))?;
    let proof = if skill.proof.trim().is_empty() {
        "None"
    } else {
        skill.proof.trim()
    };

    let prompt = SKILL_VALIDATION_PROMPT
        .replace("{skill_name}", skill.name.trim())
        .replace("{rating}", &skill.rating.to_string())
        .replace("{rating_label}", rating_label(skill.rating))
        .replace("{proof}", proof)
        .replace("{certifications}", &certifications);

    let output = state
        .llm
        .generate(&prompt, None, Vec::new(), ResponseFormat::Text)
        .await?;

    let support_level = SupportLevel::from_validation_output(&output.text).ok_or_else(|| {
        AppError::ModelContract(format!(
            "validation call returned an unrecognized support level: '{}'",
            output.text.trim()
        ))
    })?;

    Ok(Json(support_level))
}

/// POST /api/v1/skills/summary
///
/// Generates a professional summary (100-150 word target, not enforced)
/// from concatenated proof points. Returns the summary as a JSON string.
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<String>, AppError> {
    let prompt = SUMMARY_PROMPT.replace("{proof_points}", &request.all_proof_points);

    let output = state
        .llm
        .generate(&prompt, None, Vec::new(), ResponseFormat::Text)
        .await?;

    Ok(Json(output.text.trim().to_string()))
}

async fn fetch_skill_profile(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
) -> Result<SkillProfileRow, AppError> {
    let row: Option<SkillProfileRow> =
        sqlx::query_as("SELECT * FROM skill_profiles WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;
    row.ok_or_else(|| AppError::NotFound(format!("Skill profile {id} not found")))
}
