pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::dashboards::handlers as dashboards;
use crate::extraction::upload::MAX_UPLOAD_BYTES;
use crate::interview::handlers as interview;
use crate::opportunities::handlers as opportunities;
use crate::quiz::handlers as quiz;
use crate::resume::handlers as resume;
use crate::scoring::handlers as scoring;
use crate::skillgap::handlers as skillgap;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Users
        .route("/api/v1/users", post(users::handle_create_user))
        .route("/api/v1/users/:uid", get(users::handle_get_user))
        .route("/api/v1/users/:uid/login", post(users::handle_login))
        .route(
            "/api/v1/users/:uid/activity",
            get(scoring::handle_activity_history),
        )
        .route(
            "/api/v1/users/:uid/resume",
            get(resume::handle_get_resume).put(resume::handle_update_resume),
        )
        // Competency score
        .route(
            "/api/v1/user/update-score",
            post(scoring::handle_update_score),
        )
        // Resume
        .route("/api/v1/resume/analyze", post(resume::handle_analyze_resume))
        // Quiz
        .route("/api/v1/quiz/generate", post(quiz::handle_generate_quiz))
        .route("/api/v1/quiz/grade", post(quiz::handle_grade_quiz))
        // Interview
        .route("/api/v1/interview/start", post(interview::handle_start))
        .route("/api/v1/interview/chat", post(interview::handle_chat))
        .route("/api/v1/interview/evaluate", post(interview::handle_evaluate))
        .route("/api/v1/interview/logs", post(interview::handle_save_log))
        // Skill gap
        .route("/api/v1/skillgap/parse-jd", post(skillgap::handle_parse_jd))
        .route("/api/v1/skillgap/analyze", post(skillgap::handle_analyze_gap))
        .route("/api/v1/skillgap/courses", post(skillgap::handle_courses))
        // Opportunities
        .route(
            "/api/v1/opportunities",
            post(opportunities::handle_find_opportunities),
        )
        // Dashboards
        .route(
            "/api/v1/recruiter/candidates",
            get(dashboards::handle_list_candidates),
        )
        .route(
            "/api/v1/admin/overview",
            get(dashboards::handle_admin_overview),
        )
        // Multipart overhead on top of the largest accepted file.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 1024 * 1024))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extraction::TextExtractor;
    use crate::llm_client::{LlmClient, Provider};
    use crate::search::SearchClient;
    use crate::skillgap::gap_analysis::KeywordGapAnalyzer;

    /// State whose pool never connects; only routes that fail validation
    /// before touching the database are exercised.
    fn test_state() -> AppState {
        let config = Config {
            database_url: "postgres://localhost/ascendra_test".to_string(),
            gemini_api_key: None,
            groq_api_key: None,
            xai_api_key: None,
            tavily_api_key: None,
            text_extractor_url: None,
            s3_bucket: None,
            s3_endpoint: None,
            interview_log_dir: PathBuf::from("logs"),
            port: 0,
            rust_log: "info".to_string(),
        };
        AppState {
            db: PgPoolOptions::new()
                .connect_lazy(&config.database_url)
                .unwrap(),
            gemini: LlmClient::new(Provider::Gemini, None).unwrap(),
            groq: LlmClient::new(Provider::Groq, None).unwrap(),
            xai: LlmClient::new(Provider::Xai, None).unwrap(),
            search: SearchClient::new(reqwest::Client::new(), None),
            extractor: TextExtractor::new(reqwest::Client::new(), None),
            storage: None,
            config,
            gap_analyzer: Arc::new(KeywordGapAnalyzer),
        }
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_post(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let boundary = "ascendra-boundary";
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{boundary}\r\n"));
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: text/plain\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_resume_upload_without_file_is_file_required() {
        let app = build_router(test_state());
        let response = app
            .oneshot(multipart_post(
                "/api/v1/resume/analyze",
                &[("user_id", None, "u1")],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "FILE_REQUIRED");
    }

    #[tokio::test]
    async fn test_resume_upload_without_user_is_user_id_required() {
        let app = build_router(test_state());
        let response = app
            .oneshot(multipart_post(
                "/api/v1/resume/analyze",
                &[("file", Some("resume.txt"), "Jane Doe, Rust engineer")],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "USER_ID_REQUIRED");
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["service"], "ascendra-api");
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_update_score_requires_fields() {
        let app = build_router(test_state());
        let response = app
            .oneshot(json_post("/api/v1/user/update-score", r#"{"user_id": "u1"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_update_score_rejects_unknown_activity() {
        let app = build_router(test_state());
        let response = app
            .oneshot(json_post(
                "/api/v1/user/update-score",
                r#"{"user_id": "u1", "type": "essay", "score": 50}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_company_is_404() {
        let app = build_router(test_state());
        let response = app
            .oneshot(json_post(
                "/api/v1/skillgap/analyze",
                r#"{"target": "Initech", "student_skills": ["Rust"]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_gap_analysis_with_inline_skills() {
        let app = build_router(test_state());
        let response = app
            .oneshot(json_post(
                "/api/v1/skillgap/analyze",
                r#"{"target": "Google", "student_skills": ["Python"]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["radarData"].as_array().unwrap().len(), 5);
        assert_eq!(body["upskillingPlan"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_quiz_generation_falls_back_to_bank() {
        let app = build_router(test_state());
        let response = app
            .oneshot(json_post(
                "/api/v1/quiz/generate",
                r#"{"type": "technical", "skills": ["Rust"]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["quiz"]["questions"].as_array().unwrap().len(), 5);
        assert_eq!(body["quiz"]["questions"][0]["id"], "q1");
    }

    #[tokio::test]
    async fn test_candidates_reject_bad_min_score() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::get("/api/v1/recruiter/candidates?min_score=150")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_interview_start() {
        let app = build_router(test_state());
        let response = app
            .oneshot(json_post("/api/v1/interview/start", r#"{"weaknesses": ["React"]}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total_questions"], 4);
    }
}
