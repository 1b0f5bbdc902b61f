//! Password-reset request/confirm handlers.
//!
//! The request endpoint answers with the same generic 200 whether or not
//! the email maps to an account, and mail delivery failures are absorbed
//! by the mailer. Nothing in the observable response distinguishes an
//! existing account from an unknown one.

use atelier_core::error::CoreError;
use atelier_db::repositories::UserRepo;
use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::auth::jwt::{generate_reset_token, hash_reset_token, RESET_TOKEN_EXPIRY_HOURS};
use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Request body for `POST /auth/password-reset/request`.
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

/// Request body for `POST /auth/password-reset/confirm`.
#[derive(Debug, Deserialize)]
pub struct ResetConfirm {
    pub token: String,
    pub new_password: String,
}

/// The one message every reset request gets back.
const RESET_REQUESTED_MESSAGE: &str =
    "If an account with that email exists, a reset link has been sent";

/// POST /api/v1/auth/password-reset/request
pub async fn request_reset(
    State(state): State<AppState>,
    Json(input): Json<ResetRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = input.email.trim().to_lowercase();

    if let Some(user) = UserRepo::find_by_email(&state.pool, &email).await? {
        let (plaintext, token_hash) = generate_reset_token();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_EXPIRY_HOURS);

        UserRepo::set_reset_token(&state.pool, user.id, &token_hash, expires_at).await?;

        let reset_url = format!(
            "{}/reset-password?token={plaintext}",
            state.config.frontend_url
        );
        state
            .mailer
            .send_password_reset(&user.email, &user.name, &reset_url)
            .await;
    }

    Ok(Json(MessageResponse::new(RESET_REQUESTED_MESSAGE)))
}

/// POST /api/v1/auth/password-reset/confirm
///
/// Exchange a valid reset token for a new password. Also clears the
/// must-change-password flag, since the user just chose a password.
pub async fn confirm_reset(
    State(state): State<AppState>,
    Json(input): Json<ResetConfirm>,
) -> AppResult<Json<MessageResponse>> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::validation(msg)))?;

    let token_hash = hash_reset_token(&input.token);
    let user = UserRepo::find_by_valid_reset_token(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::validation("Invalid or expired reset token")))?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::Internal(format!("hashing error: {e}")))?;

    UserRepo::set_password_and_clear_reset_token(&state.pool, user.id, &password_hash).await?;

    Ok(Json(MessageResponse::new("Password has been reset")))
}
