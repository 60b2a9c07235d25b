//! Axum route handlers for the profile and its ordered child collections.
//!
//! Batch saves and reorder commits rewrite every sibling row inside one
//! transaction, assigning `sort_order` from list position — a partial
//! failure rolls the whole commit back.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::sessions::AuthUser;
use crate::errors::AppError;
use crate::models::profile::{AccreditationRow, EmploymentRow, ProfileRow};
use crate::profile::ordering::{resequence, validate_permutation};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub name: String,
    pub sex: String,
    pub city: String,
    pub current_employer: String,
    pub current_job_title: String,
    pub years_of_employment: Option<i32>,
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentInput {
    pub id: Option<Uuid>,
    pub company: String,
    pub job_title: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccreditationInput {
    pub id: Option<Uuid>,
    pub name: String,
    pub institute: String,
    #[serde(default)]
    pub location: String,
    pub year: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub ordered_ids: Vec<Uuid>,
}

impl ProfileInput {
    fn validate(&self) -> Result<(), AppError> {
        for (value, field) in [
            (&self.name, "name"),
            (&self.sex, "sex"),
            (&self.city, "city"),
            (&self.current_employer, "currentEmployer"),
            (&self.current_job_title, "currentJobTitle"),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} is required")));
            }
        }
        if matches!(self.years_of_employment, Some(years) if years < 0) {
            return Err(AppError::Validation(
                "yearsOfEmployment must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl EmploymentInput {
    fn validate(&self) -> Result<(), AppError> {
        if self.company.trim().is_empty()
            || self.job_title.trim().is_empty()
            || self.start_date.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Company, job title and start date are required".to_string(),
            ));
        }
        Ok(())
    }
}

impl AccreditationInput {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty()
            || self.institute.trim().is_empty()
            || self.year.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Name, institute and year are required".to_string(),
            ));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profile
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileRow>, AppError> {
    let profile: Option<ProfileRow> = sqlx::query_as("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user.id)
        .fetch_optional(&state.db)
        .await?;
    profile
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Profile not yet created".to_string()))
}

/// PUT /api/v1/profile
///
/// Upsert with merge semantics: overwrites the submitted fields and leaves
/// `resume_url` (owned by the upload handler) untouched.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ProfileInput>,
) -> Result<Json<ProfileRow>, AppError> {
    input.validate()?;

    let profile: ProfileRow = sqlx::query_as(
        r#"
        INSERT INTO profiles
            (user_id, name, sex, city, current_employer, current_job_title,
             years_of_employment, linkedin_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (user_id) DO UPDATE SET
            name = EXCLUDED.name,
            sex = EXCLUDED.sex,
            city = EXCLUDED.city,
            current_employer = EXCLUDED.current_employer,
            current_job_title = EXCLUDED.current_job_title,
            years_of_employment = EXCLUDED.years_of_employment,
            linkedin_url = EXCLUDED.linkedin_url,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(input.name.trim())
    .bind(input.sex.trim())
    .bind(input.city.trim())
    .bind(input.current_employer.trim())
    .bind(input.current_job_title.trim())
    .bind(input.years_of_employment)
    .bind(input.linkedin_url.as_deref().map(str::trim))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(profile))
}

// ────────────────────────────────────────────────────────────────────────────
// Employment history
// ────────────────────────────────────────────────────────────────────────────

pub async fn list_employment(pool: &PgPool, user_id: Uuid) -> Result<Vec<EmploymentRow>, AppError> {
    let rows = sqlx::query_as(
        "SELECT * FROM employment_history WHERE user_id = $1 ORDER BY sort_order",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// GET /api/v1/profile/employment
pub async fn handle_list_employment(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<EmploymentRow>>, AppError> {
    Ok(Json(list_employment(&state.db, user.id).await?))
}

/// POST /api/v1/profile/employment — append a single position.
pub async fn handle_add_employment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<EmploymentInput>,
) -> Result<Json<EmploymentRow>, AppError> {
    input.validate()?;

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM employment_history WHERE user_id = $1")
            .bind(user.id)
            .fetch_one(&state.db)
            .await?;

    let row: EmploymentRow = sqlx::query_as(
        r#"
        INSERT INTO employment_history
            (user_id, company, job_title, start_date, end_date, city, description, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(input.company.trim())
    .bind(input.job_title.trim())
    .bind(input.start_date.trim())
    .bind(input.end_date.trim())
    .bind(input.city.trim())
    .bind(&input.description)
    .bind(count as i32)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// PUT /api/v1/profile/employment — batch save.
///
/// Upserts the submitted list in one transaction, assigning `sort_order`
/// from list position. This doubles as the reorder commit after a drag.
pub async fn handle_save_employment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(items): Json<Vec<EmploymentInput>>,
) -> Result<Json<Vec<EmploymentRow>>, AppError> {
    for item in &items {
        item.validate()?;
    }

    let mut tx = state.db.begin().await?;
    for (index, item) in items.iter().enumerate() {
        let id = item.id.unwrap_or_else(Uuid::new_v4);
        sqlx::query(
            r#"
            INSERT INTO employment_history
                (id, user_id, company, job_title, start_date, end_date, city, description, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                company = EXCLUDED.company,
                job_title = EXCLUDED.job_title,
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date,
                city = EXCLUDED.city,
                description = EXCLUDED.description,
                sort_order = EXCLUDED.sort_order
            WHERE employment_history.user_id = EXCLUDED.user_id
            "#,
        )
        .bind(id)
        .bind(user.id)
        .bind(item.company.trim())
        .bind(item.job_title.trim())
        .bind(item.start_date.trim())
        .bind(item.end_date.trim())
        .bind(item.city.trim())
        .bind(&item.description)
        .bind(index as i32)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    Ok(Json(list_employment(&state.db, user.id).await?))
}

/// PUT /api/v1/profile/employment/:id
pub async fn handle_update_employment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<EmploymentInput>,
) -> Result<Json<EmploymentRow>, AppError> {
    input.validate()?;

    let row: Option<EmploymentRow> = sqlx::query_as(
        r#"
        UPDATE employment_history SET
            company = $3, job_title = $4, start_date = $5,
            end_date = $6, city = $7, description = $8
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user.id)
    .bind(input.company.trim())
    .bind(input.job_title.trim())
    .bind(input.start_date.trim())
    .bind(input.end_date.trim())
    .bind(input.city.trim())
    .bind(&input.description)
    .fetch_optional(&state.db)
    .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Employment item {id} not found")))
}

/// DELETE /api/v1/profile/employment/:id
pub async fn handle_delete_employment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    sqlx::query("DELETE FROM employment_history WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/profile/employment/reorder
pub async fn handle_reorder_employment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Vec<EmploymentRow>>, AppError> {
    let existing: Vec<Uuid> =
        sqlx::query_scalar("SELECT id FROM employment_history WHERE user_id = $1")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;
    validate_permutation(&existing, &request.ordered_ids).map_err(AppError::Validation)?;

    let mut tx = state.db.begin().await?;
    for (id, sort_order) in resequence(&request.ordered_ids) {
        sqlx::query("UPDATE employment_history SET sort_order = $3 WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user.id)
            .bind(sort_order)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    Ok(Json(list_employment(&state.db, user.id).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Accreditations
// ────────────────────────────────────────────────────────────────────────────

pub async fn list_accreditations(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<AccreditationRow>, AppError> {
    let rows = sqlx::query_as(
        "SELECT * FROM accreditations WHERE user_id = $1 ORDER BY sort_order",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// GET /api/v1/profile/accreditations
pub async fn handle_list_accreditations(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<AccreditationRow>>, AppError> {
    Ok(Json(list_accreditations(&state.db, user.id).await?))
}

/// POST /api/v1/profile/accreditations — append a single accreditation.
pub async fn handle_add_accreditation(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<AccreditationInput>,
) -> Result<Json<AccreditationRow>, AppError> {
    input.validate()?;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accreditations WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&state.db)
        .await?;

    let row: AccreditationRow = sqlx::query_as(
        r#"
        INSERT INTO accreditations (user_id, name, institute, location, year, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(input.name.trim())
    .bind(input.institute.trim())
    .bind(input.location.trim())
    .bind(input.year.trim())
    .bind(count as i32)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// PUT /api/v1/profile/accreditations — batch save, same shape as employment.
pub async fn handle_save_accreditations(
    State(state): State<AppState>,
    user: AuthUser,
    Json(items): Json<Vec<AccreditationInput>>,
) -> Result<Json<Vec<AccreditationRow>>, AppError> {
    for item in &items {
        item.validate()?;
    }

    let mut tx = state.db.begin().await?;
    for (index, item) in items.iter().enumerate() {
        let id = item.id.unwrap_or_else(Uuid::new_v4);
        sqlx::query(
            r#"
            INSERT INTO accreditations (id, user_id, name, institute, location, year, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                institute = EXCLUDED.institute,
                location = EXCLUDED.location,
                year = EXCLUDED.year,
                sort_order = EXCLUDED.sort_order
            WHERE accreditations.user_id = EXCLUDED.user_id
            "#,
        )
        .bind(id)
        .bind(user.id)
        .bind(item.name.trim())
        .bind(item.institute.trim())
        .bind(item.location.trim())
        .bind(item.year.trim())
        .bind(index as i32)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    Ok(Json(list_accreditations(&state.db, user.id).await?))
}

/// PUT /api/v1/profile/accreditations/:id
pub async fn handle_update_accreditation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<AccreditationInput>,
) -> Result<Json<AccreditationRow>, AppError> {
    input.validate()?;

    let row: Option<AccreditationRow> = sqlx::query_as(
        r#"
        UPDATE accreditations SET name = $3, institute = $4, location = $5, year = $6
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user.id)
    .bind(input.name.trim())
    .bind(input.institute.trim())
    .bind(input.location.trim())
    .bind(input.year.trim())
    .fetch_optional(&state.db)
    .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Accreditation {id} not found")))
}

/// DELETE /api/v1/profile/accreditations/:id
pub async fn handle_delete_accreditation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    sqlx::query("DELETE FROM accreditations WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/profile/accreditations/reorder
pub async fn handle_reorder_accreditations(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Vec<AccreditationRow>>, AppError> {
    let existing: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM accreditations WHERE user_id = $1")
        .bind(user.id)
        .fetch_all(&state.db)
        .await?;
    validate_permutation(&existing, &request.ordered_ids).map_err(AppError::Validation)?;

    let mut tx = state.db.begin().await?;
    for (id, sort_order) in resequence(&request.ordered_ids) {
        sqlx::query("UPDATE accreditations SET sort_order = $3 WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user.id)
            .bind(sort_order)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    Ok(Json(list_accreditations(&state.db, user.id).await?))
}
