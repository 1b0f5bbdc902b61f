//! Handlers for user accounts and the authenticated profile.

use atelier_core::error::CoreError;
use atelier_core::roles::Role;
use atelier_core::types::DbId;
use atelier_db::models::user::{CreateUser, PublicUser};
use atelier_db::repositories::UserRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::password::{generate_password, hash_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /users/me`.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Request body for `POST /users` (admin).
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Response for `POST /users`. The generated password appears here once
/// and is never retrievable again.
#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub user: PublicUser,
    pub initial_password: String,
}

/// GET /api/v1/users/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<PublicUser>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("user", auth_user.user_id)))?;
    Ok(Json(DataResponse::new(PublicUser::from(user))))
}

/// PUT /api/v1/users/me
///
/// Update name and/or email of the authenticated user. A changed email is
/// checked against existing accounts first so the common case gets a clean
/// 409; the `uq_users_email` constraint still backstops races.
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<PublicUser>>> {
    let name = match &input.name {
        Some(name) => {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(AppError::Core(CoreError::validation("Name cannot be empty")));
            }
            Some(trimmed.to_string())
        }
        None => None,
    };

    let email = match &input.email {
        Some(email) => {
            let normalized = email.trim().to_lowercase();
            validate_email(&normalized)?;
            if let Some(existing) = UserRepo::find_by_email(&state.pool, &normalized).await? {
                if existing.id != auth_user.user_id {
                    return Err(AppError::Core(CoreError::Conflict(
                        "Email is already in use".into(),
                    )));
                }
            }
            Some(normalized)
        }
        None => None,
    };

    let updated = UserRepo::update_profile(
        &state.pool,
        auth_user.user_id,
        name.as_deref(),
        email.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("user", auth_user.user_id)))?;

    Ok(Json(DataResponse::new(updated)))
}

/// GET /api/v1/users (admin)
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<PublicUser>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(users)))
}

/// POST /api/v1/users (admin)
///
/// Create an account with a generated initial password. The account is
/// flagged to change it at first login.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedUser>>)> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::validation("Name is required")));
    }
    let email = input.email.trim().to_lowercase();
    validate_email(&email)?;

    let initial_password = generate_password();
    let password_hash = hash_password(&initial_password)
        .map_err(|e| AppError::Internal(format!("hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name,
            email,
            role: input.role,
            password_hash,
            must_change_password: true,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "created user account");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(CreatedUser {
            user: PublicUser::from(user),
            initial_password,
        })),
    ))
}

/// DELETE /api/v1/users/{id} (admin)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::validation(
            "You cannot delete your own account",
        )));
    }

    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("user", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn validate_email(email: &str) -> AppResult<()> {
    // Same address grammar the mailer uses, so an account we accept here
    // is one the reset flow can actually send to.
    if email.parse::<lettre::Address>().is_err() {
        return Err(AppError::Core(CoreError::validation(
            "A valid email address is required",
        )));
    }
    Ok(())
}
