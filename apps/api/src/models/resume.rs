use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub user_id: String,
    pub skill_id: String,
    pub name: String,
    pub category: String,
    pub confidence: f64,
    pub source: String,
    pub active: bool,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub user_id: String,
    pub project_id: String,
    pub title: String,
    pub summary: Option<String>,
    pub tech_stack: Vec<String>,
    pub source: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExperienceRow {
    pub user_id: String,
    pub experience_id: String,
    pub role: String,
    pub company: String,
    pub duration: Option<String>,
    pub responsibilities: Vec<String>,
    pub source: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EducationRow {
    pub user_id: String,
    pub education_id: String,
    pub institution: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub year: Option<String>,
    pub source: String,
    pub last_updated: DateTime<Utc>,
}
