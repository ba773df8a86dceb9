use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::anxiety::{summarize, AnxietySummary, ExpressionFrame};
use crate::interview::evaluation::{evaluate, InterviewMetrics, InterviewSession};
use crate::interview::interviewer::{interviewer_turn, InterviewerReply};
use crate::interview::questions::{greeting, question_for, INTERVIEW_LENGTH};
use crate::interview::session_log::{append_entry, format_entry};
use crate::llm_client::ChatMessage;
use crate::scoring::competency::ActivityType;
use crate::scoring::store::update_user_activity_score;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub greeting: String,
    pub first_question: &'static str,
    pub total_questions: usize,
}

/// POST /api/v1/interview/start
pub async fn handle_start(Json(req): Json<StartRequest>) -> Json<StartResponse> {
    Json(StartResponse {
        greeting: greeting(&req.weaknesses),
        first_question: question_for(&req.weaknesses, 0),
        total_questions: INTERVIEW_LENGTH,
    })
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default, alias = "anxietyLevel")]
    pub anxiety_level: f64,
}

/// POST /api/v1/interview/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<InterviewerReply>, AppError> {
    let reply = interviewer_turn(&state.xai, &req.messages, &req.weaknesses, req.anxiety_level).await;
    Ok(Json(reply))
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub session: InterviewSession,
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub metrics: InterviewMetrics,
    pub duration_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competency_score: Option<i32>,
}

/// POST /api/v1/interview/evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let metrics = evaluate(&req.session);

    let competency_score = match req.user_id.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        Some(user_id) => Some(
            update_user_activity_score(
                &state.db,
                user_id,
                ActivityType::Interview,
                metrics.overall_score,
            )
            .await?
            .competency_score,
        ),
        None => None,
    };

    Ok(Json(EvaluateResponse {
        duration_minutes: req.session.duration_minutes(),
        metrics,
        competency_score,
    }))
}

/// Either a precomputed summary, raw anxiety samples, or raw expression
/// frames. The first one present wins.
#[derive(Debug, Deserialize)]
pub struct SessionLogRequest {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub transcript: String,
    #[serde(default, alias = "anxietyData")]
    pub anxiety_data: Option<AnxietySummary>,
    #[serde(default)]
    pub samples: Vec<f64>,
    #[serde(default)]
    pub frames: Vec<ExpressionFrame>,
}

impl SessionLogRequest {
    pub fn summary(&self) -> AnxietySummary {
        if let Some(summary) = self.anxiety_data {
            summary
        } else if !self.samples.is_empty() {
            summarize(&self.samples)
        } else {
            let samples: Vec<f64> = self.frames.iter().map(ExpressionFrame::anxiety).collect();
            summarize(&samples)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionLogResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /api/v1/interview/logs
pub async fn handle_save_log(
    State(state): State<AppState>,
    Json(req): Json<SessionLogRequest>,
) -> Result<Json<SessionLogResponse>, AppError> {
    let timestamp = req
        .timestamp
        .clone()
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
    let entry = format_entry(&timestamp, &req.transcript, &req.summary());

    append_entry(&state.config.interview_log_dir, &entry)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to save log: {e}")))?;

    Ok(Json(SessionLogResponse {
        success: true,
        message: "Log saved",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_request_prefers_summary() {
        let req: SessionLogRequest = serde_json::from_str(
            r#"{"transcript": "hi", "anxietyData": {"average": 0.5, "min": 0.1, "max": 0.9, "count": 3}, "samples": [0.0]}"#,
        )
        .unwrap();
        assert_eq!(req.summary().count, 3);
    }

    #[test]
    fn test_log_request_summarizes_frames() {
        let req: SessionLogRequest = serde_json::from_str(
            r#"{"transcript": "hi", "frames": [{"fear": 1.0, "sad": 0.0}, {"fear": 0.0, "sad": 1.0}]}"#,
        )
        .unwrap();
        let s = req.summary();
        assert_eq!(s.count, 2);
        assert!((s.average - 0.5).abs() < 1e-9);
        assert!((s.min - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_chat_request_accepts_camel_case_anxiety() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"messages": [{"role": "user", "content": "hello"}], "anxietyLevel": 0.4}"#,
        )
        .unwrap();
        assert_eq!(req.anxiety_level, 0.4);
        assert!(req.weaknesses.is_empty());
    }
}
