//! Repository for the `users` table.

use atelier_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, PublicUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, role, password_hash, must_change_password, \
     reset_token_hash, reset_token_expires_at, created_at, updated_at";

/// Response-safe column subset.
const PUBLIC_COLUMNS: &str = "id, name, email, role, must_change_password";

/// Provides CRUD operations for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Violating `uq_users_email` surfaces as a database error the API
    /// layer maps to 409.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, role, password_hash, must_change_password)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.role.as_str())
            .bind(&input.password_hash)
            .bind(input.must_change_password)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all accounts, response-safe projection only.
    pub async fn list(pool: &PgPool) -> Result<Vec<PublicUser>, sqlx::Error> {
        let query = format!("SELECT {PUBLIC_COLUMNS} FROM users ORDER BY created_at ASC");
        sqlx::query_as::<_, PublicUser>(&query).fetch_all(pool).await
    }

    /// Update name and/or email of a profile. Only non-`None` fields apply.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<PublicUser>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {PUBLIC_COLUMNS}"
        );
        sqlx::query_as::<_, PublicUser>(&query)
            .bind(id)
            .bind(name)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Replace the password hash and the must-change flag.
    pub async fn set_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
        must_change_password: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, must_change_password = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .bind(must_change_password)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store a password-reset token hash with its expiry.
    pub async fn set_reset_token(
        pool: &PgPool,
        id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET reset_token_hash = $2, reset_token_expires_at = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find the user holding a still-valid reset token hash.
    pub async fn find_by_valid_reset_token(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE reset_token_hash = $1 AND reset_token_expires_at >= NOW()"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Set a new password and invalidate any outstanding reset token.
    pub async fn set_password_and_clear_reset_token(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET password_hash = $2, reset_token_hash = NULL,
                    reset_token_expires_at = NULL, must_change_password = FALSE,
                    updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete a user by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
