//! Initial admin account creation at startup.

use atelier_core::roles::Role;
use atelier_db::models::user::CreateUser;
use atelier_db::repositories::UserRepo;
use atelier_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Create the initial admin account from `ADMIN_EMAIL` / `ADMIN_PASSWORD` /
/// `ADMIN_NAME` if no account with that email exists yet.
///
/// Non-fatal: a deployment without these variables, or one where creation
/// fails, still serves traffic. Failures are logged.
pub async fn ensure_admin_account(pool: &DbPool) {
    let Ok(email) = std::env::var("ADMIN_EMAIL") else {
        tracing::info!("ADMIN_EMAIL not set; skipping admin bootstrap");
        return;
    };
    let Ok(password) = std::env::var("ADMIN_PASSWORD") else {
        tracing::warn!("ADMIN_EMAIL set without ADMIN_PASSWORD; skipping admin bootstrap");
        return;
    };
    let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string());

    match create_admin_if_absent(pool, &name, &email, &password).await {
        Ok(true) => tracing::info!(%email, "created initial admin account"),
        Ok(false) => tracing::debug!(%email, "admin account already present"),
        Err(error) => tracing::warn!(%error, %email, "admin bootstrap failed"),
    }
}

async fn create_admin_if_absent(
    pool: &DbPool,
    name: &str,
    email: &str,
    password: &str,
) -> AppResult<bool> {
    if UserRepo::find_by_email(pool, email).await?.is_some() {
        return Ok(false);
    }

    let password_hash =
        hash_password(password).map_err(|e| AppError::Internal(format!("hashing error: {e}")))?;

    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            role: Role::Admin,
            password_hash,
            must_change_password: false,
        },
    )
    .await?;

    Ok(true)
}
