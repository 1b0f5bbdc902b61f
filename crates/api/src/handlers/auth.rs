//! Handlers for login and authenticated password changes.

use atelier_core::error::CoreError;
use atelier_db::models::user::PublicUser;
use atelier_db::repositories::UserRepo;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::auth::password::{dummy_hash, hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. The failure message never reveals
/// whether the email exists, and an unknown email still pays for one
/// Argon2 verification so the two failure paths cost the same.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = input.email.trim().to_lowercase();

    let user = match UserRepo::find_by_email(&state.pool, &email).await? {
        Some(user) => user,
        None => {
            let _ = verify_password(&input.password, dummy_hash());
            return Err(invalid_credentials());
        }
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let token = generate_token(user.id, user.role, &state.config.jwt)
        .map_err(|e| AppError::Internal(format!("token generation error: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        user: PublicUser::from(user),
    }))
}

/// POST /api/v1/auth/change-password
///
/// Set a new password for the authenticated user and clear the
/// must-change-password flag.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    if input.new_password != input.confirm_password {
        return Err(AppError::Core(CoreError::validation(
            "Passwords do not match",
        )));
    }
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::validation(msg)))?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::Internal(format!("hashing error: {e}")))?;

    let updated =
        UserRepo::set_password(&state.pool, auth_user.user_id, &password_hash, false).await?;
    if !updated {
        return Err(AppError::Core(CoreError::not_found(
            "user",
            auth_user.user_id,
        )));
    }

    Ok(Json(MessageResponse::new("Password updated")))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid credentials".into()))
}
