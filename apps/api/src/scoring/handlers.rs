use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::scoring::competency::{round_half_up, ActivityEntry, ActivityType, Scores};
use crate::scoring::store::{load_history, update_user_activity_score};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateScoreRequest {
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
    #[serde(default, rename = "type")]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct UpdateScoreResponse {
    pub success: bool,
    pub message: &'static str,
    pub competency_score: i32,
    pub scores: Scores,
}

/// Checks the request shape before anything touches the database.
pub fn validate_score_request(
    req: &UpdateScoreRequest,
) -> Result<(String, ActivityType, i32), AppError> {
    let (Some(user_id), Some(kind), Some(score)) = (
        req.user_id.as_deref().map(str::trim).filter(|u| !u.is_empty()),
        req.activity_type.as_deref(),
        req.score,
    ) else {
        return Err(AppError::Validation(
            "user_id, type, and score are required".to_string(),
        ));
    };

    let kind = ActivityType::parse(kind)
        .ok_or_else(|| AppError::Validation("Invalid activity type".to_string()))?;

    if !score.is_finite() || !(0.0..=100.0).contains(&score) {
        return Err(AppError::Validation(
            "score must be between 0 and 100".to_string(),
        ));
    }

    Ok((user_id.to_string(), kind, round_half_up(score)))
}

/// POST /api/v1/user/update-score
pub async fn handle_update_score(
    State(state): State<AppState>,
    Json(req): Json<UpdateScoreRequest>,
) -> Result<Json<UpdateScoreResponse>, AppError> {
    let (user_id, kind, score) = validate_score_request(&req)?;
    let update = update_user_activity_score(&state.db, &user_id, kind, score).await?;

    Ok(Json(UpdateScoreResponse {
        success: true,
        message: "Score updated successfully",
        competency_score: update.competency_score,
        scores: update.scores,
    }))
}

/// GET /api/v1/users/:uid/activity
pub async fn handle_activity_history(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<ActivityEntry>>, AppError> {
    Ok(Json(load_history(&state.db, &uid).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_id: Option<&str>, kind: Option<&str>, score: Option<f64>) -> UpdateScoreRequest {
        UpdateScoreRequest {
            user_id: user_id.map(String::from),
            activity_type: kind.map(String::from),
            score,
        }
    }

    #[test]
    fn test_missing_fields_rejected() {
        for req in [
            request(None, Some("quiz"), Some(80.0)),
            request(Some("  "), Some("quiz"), Some(80.0)),
            request(Some("u1"), None, Some(80.0)),
            request(Some("u1"), Some("quiz"), None),
        ] {
            let err = validate_score_request(&req).unwrap_err();
            assert!(
                matches!(err, AppError::Validation(ref m) if m == "user_id, type, and score are required")
            );
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = validate_score_request(&request(Some("u1"), Some("essay"), Some(10.0))).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Invalid activity type"));
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        assert!(validate_score_request(&request(Some("u1"), Some("quiz"), Some(101.0))).is_err());
        assert!(validate_score_request(&request(Some("u1"), Some("quiz"), Some(-1.0))).is_err());
    }

    #[test]
    fn test_valid_request_rounds_score() {
        let (uid, kind, score) =
            validate_score_request(&request(Some("u1"), Some("interview"), Some(72.5))).unwrap();
        assert_eq!(uid, "u1");
        assert_eq!(kind, ActivityType::Interview);
        assert_eq!(score, 73);
    }

    #[test]
    fn test_camel_case_user_id_accepted() {
        let req: UpdateScoreRequest =
            serde_json::from_str(r#"{"userId": "abc", "type": "quiz", "score": 0}"#).unwrap();
        let (uid, kind, score) = validate_score_request(&req).unwrap();
        assert_eq!((uid.as_str(), kind, score), ("abc", ActivityType::Quiz, 0));
    }
}
