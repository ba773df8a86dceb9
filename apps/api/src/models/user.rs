use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::scoring::competency::Scores;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub uid: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub provider: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub professional_summary: Option<String>,
    pub resume_url: Option<String>,
    pub skills: Vec<String>,
    pub competency_score: Option<i32>,
    pub scores: Option<Json<Scores>>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}
