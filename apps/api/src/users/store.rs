use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::users::profile::{AuthProvider, UserRole};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub provider: AuthProvider,
}

/// Creates the profile for a freshly signed-up account.
///
/// A row that already exists only because a resume was uploaded first (no
/// name yet) is claimed; any other existing row is a duplicate.
pub async fn create_user(pool: &PgPool, user: &NewUser) -> Result<UserRow, AppError> {
    let row: Option<UserRow> = sqlx::query_as(
        r#"
        INSERT INTO users (uid, name, email, role, provider, last_login_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        ON CONFLICT (uid) DO UPDATE SET
            name = EXCLUDED.name,
            email = EXCLUDED.email,
            role = EXCLUDED.role,
            provider = EXCLUDED.provider,
            last_login_at = NOW(),
            updated_at = NOW()
        WHERE users.name IS NULL
        RETURNING *
        "#,
    )
    .bind(&user.uid)
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.role.as_str())
    .bind(user.provider.as_str())
    .fetch_optional(pool)
    .await?;

    let row = row.ok_or_else(|| {
        AppError::UnprocessableEntity(format!("User {} already exists", user.uid))
    })?;
    info!("Created {} profile for {}", row.role, row.uid);
    Ok(row)
}

pub async fn get_user(pool: &PgPool, uid: &str) -> Result<UserRow, AppError> {
    sqlx::query_as("SELECT * FROM users WHERE uid = $1")
        .bind(uid)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {uid} not found")))
}

/// Stamps `last_login_at`.
pub async fn touch_login(pool: &PgPool, uid: &str) -> Result<UserRow, AppError> {
    sqlx::query_as(
        "UPDATE users SET last_login_at = NOW(), updated_at = NOW() WHERE uid = $1 RETURNING *",
    )
    .bind(uid)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User {uid} not found")))
}
