use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Creates a PostgreSQL connection pool and applies pending migrations.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");

    Ok(pool)
}

/// Helpers for tests that need a live database. They run only when
/// `TEST_DATABASE_URL` is set and return early otherwise.
#[cfg(test)]
pub mod testing {
    use sqlx::PgPool;

    pub async fn pool() -> Option<PgPool> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        Some(
            super::create_pool(&url)
                .await
                .expect("failed to connect to TEST_DATABASE_URL"),
        )
    }

    /// A uid no other test run will collide with.
    pub fn unique_uid(prefix: &str) -> String {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        format!("{prefix}-{nanos}")
    }

    pub async fn create_user(pool: &PgPool, uid: &str) {
        sqlx::query("INSERT INTO users (uid, role) VALUES ($1, 'student')")
            .bind(uid)
            .execute(pool)
            .await
            .expect("insert test user");
    }

    /// Deletes the user; child rows go with it.
    pub async fn delete_user(pool: &PgPool, uid: &str) {
        sqlx::query("DELETE FROM users WHERE uid = $1")
            .bind(uid)
            .execute(pool)
            .await
            .expect("delete test user");
    }
}
