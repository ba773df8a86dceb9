use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::scoring::competency::ActivityType;
use crate::users::profile::UserRole;

/// Inclusive competency ranges used for the distribution chart.
pub const BUCKETS: [(i32, i32); 4] = [(0, 39), (40, 59), (60, 79), (80, 100)];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBucket {
    pub range: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminOverview {
    pub users_by_role: BTreeMap<String, i64>,
    pub student_count: i64,
    /// Mean over students that have a score, one decimal place.
    pub average_competency: Option<f64>,
    pub distribution: Vec<ScoreBucket>,
    pub activity_counts: BTreeMap<String, i64>,
}

pub fn distribution(scores: &[i32]) -> Vec<ScoreBucket> {
    BUCKETS
        .iter()
        .map(|&(lo, hi)| ScoreBucket {
            range: format!("{lo}-{hi}"),
            count: scores.iter().filter(|s| (lo..=hi).contains(*s)).count() as i64,
        })
        .collect()
}

pub fn average(scores: &[i32]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let mean = scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

/// Seeds every known key with zero so the response shape is stable.
fn counts_with_keys(keys: &[&str], rows: Vec<(String, i64)>) -> BTreeMap<String, i64> {
    let mut counts: BTreeMap<String, i64> = keys.iter().map(|k| (k.to_string(), 0)).collect();
    for (key, n) in rows {
        counts.insert(key, n);
    }
    counts
}

pub async fn load_overview(pool: &PgPool) -> Result<AdminOverview, AppError> {
    let (roles, scores, activities) = tokio::try_join!(
        sqlx::query_as::<_, (String, i64)>("SELECT role, COUNT(*) FROM users GROUP BY role")
            .fetch_all(pool),
        sqlx::query_scalar::<_, i32>(
            "SELECT competency_score FROM users WHERE role = 'student' AND competency_score IS NOT NULL",
        )
        .fetch_all(pool),
        sqlx::query_as::<_, (String, i64)>(
            "SELECT activity_type, COUNT(*) FROM activity_history GROUP BY activity_type",
        )
        .fetch_all(pool),
    )?;

    let users_by_role = counts_with_keys(
        &[
            UserRole::Student.as_str(),
            UserRole::Recruiter.as_str(),
            UserRole::CollegeAdmin.as_str(),
        ],
        roles,
    );
    let activity_counts = counts_with_keys(
        &[ActivityType::Quiz.as_str(), ActivityType::Interview.as_str()],
        activities,
    );

    Ok(AdminOverview {
        student_count: users_by_role
            .get(UserRole::Student.as_str())
            .copied()
            .unwrap_or(0),
        users_by_role,
        average_competency: average(&scores),
        distribution: distribution(&scores),
        activity_counts,
    })
}
