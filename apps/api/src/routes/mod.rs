pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;
use crate::{admin, auth, extraction, profile, report, skills};

/// Resume uploads arrive base64-inflated; well above the axum default.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth & session
        .route("/api/v1/auth/signup", post(auth::handlers::handle_signup))
        .route("/api/v1/auth/signin", post(auth::handlers::handle_signin))
        .route("/api/v1/auth/signout", post(auth::handlers::handle_signout))
        .route("/api/v1/session", get(auth::handlers::handle_session))
        .route(
            "/api/v1/session/navigate",
            post(auth::handlers::handle_navigate),
        )
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handlers::handle_get_profile).put(profile::handlers::handle_save_profile),
        )
        .route(
            "/api/v1/profile/resume",
            post(profile::upload::handle_upload_resume),
        )
        .route(
            "/api/v1/profile/employment",
            get(profile::handlers::handle_list_employment)
                .post(profile::handlers::handle_add_employment)
                .put(profile::handlers::handle_save_employment),
        )
        .route(
            "/api/v1/profile/employment/:id",
            put(profile::handlers::handle_update_employment)
                .delete(profile::handlers::handle_delete_employment),
        )
        .route(
            "/api/v1/profile/employment/reorder",
            post(profile::handlers::handle_reorder_employment),
        )
        .route(
            "/api/v1/profile/accreditations",
            get(profile::handlers::handle_list_accreditations)
                .post(profile::handlers::handle_add_accreditation)
                .put(profile::handlers::handle_save_accreditations),
        )
        .route(
            "/api/v1/profile/accreditations/:id",
            put(profile::handlers::handle_update_accreditation)
                .delete(profile::handlers::handle_delete_accreditation),
        )
        .route(
            "/api/v1/profile/accreditations/reorder",
            post(profile::handlers::handle_reorder_accreditations),
        )
        // Extraction
        .route(
            "/api/v1/extract/employment",
            post(extraction::handlers::handle_extract_employment),
        )
        .route(
            "/api/v1/extract/education",
            post(extraction::handlers::handle_extract_education),
        )
        // Skill profiles
        .route(
            "/api/v1/skill-profiles",
            get(skills::handlers::handle_list_skill_profiles)
                .post(skills::handlers::handle_create_skill_profile),
        )
        .route(
            "/api/v1/skill-profiles/:id",
            get(skills::handlers::handle_get_skill_profile)
                .put(skills::handlers::handle_update_skill_profile)
                .delete(skills::handlers::handle_delete_skill_profile),
        )
        .route(
            "/api/v1/skills/generate",
            post(skills::handlers::handle_generate_skills),
        )
        .route(
            "/api/v1/skills/validate",
            post(skills::handlers::handle_validate_skill),
        )
        .route(
            "/api/v1/skills/summary",
            post(skills::handlers::handle_generate_summary),
        )
        // Report & admin
        .route("/api/v1/reports/:id", get(report::handle_get_report))
        .route("/api/v1/admin/report", get(admin::handle_admin_report))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
