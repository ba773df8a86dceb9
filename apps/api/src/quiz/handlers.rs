use std::collections::HashMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::quiz::generator::{generate_quiz, Quiz};
use crate::quiz::grading::{grade_quiz, QuizGrade};
use crate::scoring::competency::ActivityType;
use crate::scoring::store::update_user_activity_score;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateQuizRequest {
    #[serde(rename = "type")]
    pub quiz_type: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuizResponse {
    pub quiz: Quiz,
}

#[derive(Debug, Deserialize)]
pub struct GradeQuizRequest {
    pub quiz: Quiz,
    #[serde(default)]
    pub answers: HashMap<String, usize>,
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GradeQuizResponse {
    #[serde(flatten)]
    pub grade: QuizGrade,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competency_score: Option<i32>,
}

/// POST /api/v1/quiz/generate
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    Json(req): Json<GenerateQuizRequest>,
) -> Result<Json<GenerateQuizResponse>, AppError> {
    let quiz_type = req.quiz_type.trim();
    if quiz_type.is_empty() {
        return Err(AppError::Validation("type is required".to_string()));
    }

    let quiz = generate_quiz(&state.gemini, quiz_type, &req.skills).await;
    Ok(Json(GenerateQuizResponse { quiz }))
}

/// POST /api/v1/quiz/grade
pub async fn handle_grade_quiz(
    State(state): State<AppState>,
    Json(req): Json<GradeQuizRequest>,
) -> Result<Json<GradeQuizResponse>, AppError> {
    let grade = grade_quiz(&req.quiz, &req.answers);

    let competency_score = match req.user_id.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        Some(user_id) => Some(
            update_user_activity_score(&state.db, user_id, ActivityType::Quiz, grade.percentage)
                .await?
                .competency_score,
        ),
        None => None,
    };

    Ok(Json(GradeQuizResponse {
        grade,
        competency_score,
    }))
}
