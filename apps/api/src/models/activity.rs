use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityRow {
    pub id: i64,
    pub user_id: String,
    pub activity_type: String,
    pub score: i32,
    pub recorded_at: DateTime<Utc>,
}
