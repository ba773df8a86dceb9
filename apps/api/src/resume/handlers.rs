use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::extraction::upload::{read_upload, UploadedFile};
use crate::resume::analysis::{analyze_resume, ResumeAnalysis};
use crate::resume::store::{load_resume, save_resume, DataSource, SaveSummary, StoredResume};
use crate::resume::structured::{extract_structured, StructuredResumeData};
use crate::state::AppState;

/// Extracted text shorter than this (after trimming) is treated as unreadable.
pub const MIN_RESUME_CHARS: usize = 50;

#[derive(Debug, Serialize)]
pub struct AnalyzeResumeResponse {
    pub success: bool,
    pub data: ResumeAnalysis,
}

pub fn ensure_readable(text: &str) -> Result<&str, AppError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_RESUME_CHARS {
        return Err(AppError::unprocessable(
            "EMPTY_TEXT_EXTRACTED",
            "Could not extract readable text from the resume",
        ));
    }
    Ok(trimmed)
}

async fn store_file(state: &AppState, user_id: &str, file: &UploadedFile) -> Option<String> {
    let storage = state.storage.as_ref()?;
    match storage
        .upload_resume(
            user_id,
            &file.file_name,
            file.content_type.as_deref(),
            file.bytes.clone(),
        )
        .await
    {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Resume file upload failed for {user_id} (continuing): {e}");
            None
        }
    }
}

/// POST /api/v1/resume/analyze
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    let form = read_upload(multipart).await?;

    let file = form
        .file
        .as_ref()
        .ok_or_else(|| AppError::bad_request("FILE_REQUIRED", "A resume file is required"))?;
    let user_id = form
        .field("user_id")
        .or_else(|| form.field("userId"))
        .ok_or_else(|| AppError::bad_request("USER_ID_REQUIRED", "user_id is required"))?;

    info!(
        "Processing resume {} ({}) for {}",
        file.file_name,
        file.content_type.as_deref().unwrap_or("unknown type"),
        user_id
    );

    let text = state
        .extractor
        .extract(&file.file_name, file.content_type.as_deref(), file.bytes.clone())
        .await?;
    let text = ensure_readable(&text)?;

    let (analysis, structured) = tokio::join!(
        analyze_resume(&state.gemini, text),
        extract_structured(&state.gemini, text)
    );

    match structured {
        Some(data) => {
            let resume_url = store_file(&state, user_id, file).await;
            if let Err(e) = save_resume(
                &state.db,
                user_id,
                &data,
                DataSource::Resume,
                Some(analysis.baseline_score()),
                resume_url.as_deref(),
            )
            .await
            {
                error!("Saving resume data for {user_id} failed (non-fatal): {e}");
            }
        }
        None => warn!("No structured data for {user_id}, skipping save"),
    }

    Ok(Json(AnalyzeResumeResponse {
        success: true,
        data: analysis,
    }))
}

/// PUT /api/v1/users/:uid/resume
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(data): Json<StructuredResumeData>,
) -> Result<Json<SaveSummary>, AppError> {
    let summary = save_resume(&state.db, &uid, &data, DataSource::User, None, None).await?;
    Ok(Json(summary))
}

/// GET /api/v1/users/:uid/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<StoredResume>, AppError> {
    Ok(Json(load_resume(&state.db, &uid).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_unprocessable() {
        let err = ensure_readable("   Jane Doe\n\n  ").unwrap_err();
        assert!(matches!(err, AppError::Rejected { code: "EMPTY_TEXT_EXTRACTED", .. }));
    }

    #[test]
    fn test_readable_text_is_trimmed() {
        let body = "x".repeat(MIN_RESUME_CHARS);
        let padded = format!("\n  {body}  \n");
        assert_eq!(ensure_readable(&padded).unwrap(), body);
    }

    #[test]
    fn test_response_shape() {
        let resp = AnalyzeResumeResponse {
            success: true,
            data: crate::resume::analysis::mock_analysis("skills"),
        };
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["data"]["atsScore"].is_number());
    }
}
