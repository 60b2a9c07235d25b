//! Axum route handlers for sign-up, sign-in, sign-out and session resolution.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::sessions::{
    create_session, hash_password, revoke_session, verify_password, AuthUser,
};
use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::models::user::UserRow;
use crate::state::AppState;
use crate::view::{transition, NavEvent, Resolution, ViewState};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: UserPublic,
    pub is_admin: bool,
    pub initial_view: ViewState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserPublic,
    pub profile: Option<ProfileRow>,
    pub is_admin: bool,
    pub initial_view: ViewState,
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = request.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "The password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(&email)
        .fetch_one(&state.db)
        .await?;
    if exists {
        return Err(AppError::FailedPrecondition(
            "An account already exists with this email address".to_string(),
        ));
    }

    let password_hash = hash_password(&request.password)?;
    let user: UserRow = sqlx::query_as(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *",
    )
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await?;

    let token = create_session(&state.db, user.id, state.config.session_ttl_hours).await?;

    tracing::info!("New account created for user {}", user.id);

    // A brand-new account has no profile yet; route to the profile editor.
    Ok(Json(AuthResponse {
        token,
        is_admin: state.config.is_admin(&user.id),
        initial_view: ViewState::initial(Resolution::NeedsProfile),
        user: UserPublic {
            id: user.id,
            email: user.email,
        },
    }))
}

/// POST /api/v1/auth/signin
pub async fn handle_signin(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = request.email.trim().to_lowercase();

    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    // Same rejection for unknown email and wrong password.
    let user = match user {
        Some(u) if verify_password(&request.password, &u.password_hash) => u,
        _ => return Err(AppError::Unauthorized),
    };

    let token = create_session(&state.db, user.id, state.config.session_ttl_hours).await?;
    let resolution = resolve_profile(&state, user.id).await?;

    Ok(Json(AuthResponse {
        token,
        is_admin: state.config.is_admin(&user.id),
        initial_view: ViewState::initial(resolution),
        user: UserPublic {
            id: user.id,
            email: user.email,
        },
    }))
}

/// POST /api/v1/auth/signout
pub async fn handle_signout(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<StatusCode, AppError> {
    revoke_session(&state.db, &user.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/session
///
/// Resolves the current session the way the client shell's startup does:
/// returns the user, their profile if any, and the initial view.
pub async fn handle_session(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<SessionResponse>, AppError> {
    let profile: Option<ProfileRow> = sqlx::query_as("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user.id)
        .fetch_optional(&state.db)
        .await?;

    let resolution = match &profile {
        Some(p) if !p.name.trim().is_empty() => Resolution::Ready,
        _ => Resolution::NeedsProfile,
    };

    Ok(Json(SessionResponse {
        is_admin: state.config.is_admin(&user.id),
        initial_view: ViewState::initial(resolution),
        profile,
        user: UserPublic {
            id: user.id,
            email: user.email,
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub from: ViewState,
    pub event: NavEvent,
}

/// POST /api/v1/session/navigate
///
/// Validates a shell navigation against the transition table and returns the
/// next view. Illegal navigations are rejected rather than falling through
/// to a placeholder screen.
pub async fn handle_navigate(
    _user: AuthUser,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<ViewState>, AppError> {
    transition(request.from, request.event)
        .map(Json)
        .map_err(|e| AppError::Validation(e.to_string()))
}

/// A session lands on the dashboard only once the profile has a name.
async fn resolve_profile(state: &AppState, user_id: Uuid) -> Result<Resolution, AppError> {
    let name: Option<String> = sqlx::query_scalar("SELECT name FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?;

    Ok(match name {
        Some(n) if !n.trim().is_empty() => Resolution::Ready,
        _ => Resolution::NeedsProfile,
    })
}
