use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::errors::AppError;
use crate::scoring::competency::Scores;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 200;

#[derive(Debug, Default, Deserialize)]
pub struct CandidateQuery {
    pub min_score: Option<i32>,
    pub skill: Option<String>,
    pub limit: Option<i64>,
}

/// Validated candidate filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFilter {
    pub min_score: Option<i32>,
    pub skill: Option<String>,
    pub limit: i64,
}

impl CandidateQuery {
    pub fn into_filter(self) -> Result<CandidateFilter, AppError> {
        if let Some(score) = self.min_score {
            if !(0..=100).contains(&score) {
                return Err(AppError::Validation(
                    "min_score must be between 0 and 100".to_string(),
                ));
            }
        }
        Ok(CandidateFilter {
            min_score: self.min_score,
            skill: self
                .skill
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        })
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Candidate {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub skills: Vec<String>,
    pub competency_score: Option<i32>,
    pub scores: Option<Json<Scores>>,
}

/// Students ranked by competency score, highest first. Students without a
/// score sort last and never pass a minimum-score filter.
pub async fn list_candidates(
    pool: &PgPool,
    filter: &CandidateFilter,
) -> Result<Vec<Candidate>, AppError> {
    let rows = sqlx::query_as(
        r#"
        SELECT uid, COALESCE(full_name, name) AS display_name, email, skills,
               competency_score, scores
        FROM users
        WHERE role = 'student'
          AND ($1::int IS NULL OR competency_score >= $1)
          AND ($2::text IS NULL OR EXISTS (
                SELECT 1 FROM unnest(skills) AS s WHERE lower(s) = lower($2)
              ))
        ORDER BY competency_score DESC NULLS LAST, uid
        LIMIT $3
        "#,
    )
    .bind(filter.min_score)
    .bind(filter.skill.as_deref())
    .bind(filter.limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults() {
        let filter = CandidateQuery::default().into_filter().unwrap();
        assert_eq!(
            filter,
            CandidateFilter {
                min_score: None,
                skill: None,
                limit: DEFAULT_LIMIT
            }
        );
    }

    #[test]
    fn test_filter_trims_skill_and_clamps_limit() {
        let filter = CandidateQuery {
            min_score: Some(70),
            skill: Some("  ".to_string()),
            limit: Some(10_000),
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.skill, None);
        assert_eq!(filter.limit, MAX_LIMIT);
    }

    #[test]
    fn test_filter_rejects_out_of_range_score() {
        let query = CandidateQuery {
            min_score: Some(101),
            ..Default::default()
        };
        assert!(matches!(query.into_filter(), Err(AppError::Validation(_))));
    }
}
