//! Text extraction: turns uploaded resumes and job descriptions into plain text.
//!
//! PDFs are parsed in-process with `pdf-extract` unless a remote extraction
//! service is configured, in which case PDFs and DOCX files are posted to it.
//! PDF parsing is CPU-bound and runs inside `spawn_blocking`.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

pub mod upload;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}. Only PDF, DOCX and plain text are supported.")]
    Unsupported(String),

    #[error("PDF parsing failed: {0}")]
    Pdf(String),

    #[error("Text extraction service not running at {0}. Start it or unset TEXT_EXTRACTOR_URL.")]
    ServiceUnavailable(String),

    #[error("Text extraction service failed: {0}")]
    Service(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

/// Classifies an upload by extension first, then by declared content type.
pub fn detect_kind(file_name: &str, content_type: Option<&str>) -> Option<DocumentKind> {
    let name = file_name.to_lowercase();
    let content_type = content_type.unwrap_or_default().to_lowercase();

    if name.ends_with(".pdf") || content_type == "application/pdf" {
        Some(DocumentKind::Pdf)
    } else if name.ends_with(".docx") || name.ends_with(".doc") {
        Some(DocumentKind::Docx)
    } else if name.ends_with(".txt") || name.ends_with(".md") || content_type.starts_with("text/") {
        Some(DocumentKind::Text)
    } else {
        None
    }
}

#[derive(Debug, Deserialize)]
struct ServiceResponse {
    #[serde(default)]
    text: String,
    filename: Option<String>,
    length: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    detail: String,
}

#[derive(Clone)]
pub struct TextExtractor {
    client: reqwest::Client,
    service_url: Option<String>,
}

impl TextExtractor {
    pub fn new(client: reqwest::Client, service_url: Option<String>) -> Self {
        Self {
            client,
            service_url,
        }
    }

    pub async fn extract(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Bytes,
    ) -> Result<String, ExtractionError> {
        let kind = detect_kind(file_name, content_type)
            .ok_or_else(|| ExtractionError::Unsupported(file_name.to_string()))?;

        match (kind, self.service_url.as_deref()) {
            (DocumentKind::Text, _) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            (DocumentKind::Pdf | DocumentKind::Docx, Some(url)) => {
                self.extract_remote(url, file_name, bytes).await
            }
            (DocumentKind::Pdf, None) => extract_pdf_local(bytes).await,
            (DocumentKind::Docx, None) => Err(ExtractionError::Unsupported(format!(
                "{file_name} (DOCX requires the extraction service)"
            ))),
        }
    }

    async fn extract_remote(
        &self,
        url: &str,
        file_name: &str,
        bytes: Bytes,
    ) -> Result<String, ExtractionError> {
        let form = Form::new().part(
            "file",
            Part::bytes(bytes.to_vec()).file_name(file_name.to_string()),
        );

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ExtractionError::ServiceUnavailable(url.to_string())
                } else {
                    ExtractionError::Http(e)
                }
            })?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ServiceErrorBody>(&body)
                .map(|b| b.detail)
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ExtractionError::Service(detail));
        }

        let data: ServiceResponse = response.json().await?;
        info!(
            "Extracted {} characters from {}",
            data.length.unwrap_or(data.text.len()),
            data.filename.as_deref().unwrap_or(file_name)
        );
        Ok(data.text)
    }
}

async fn extract_pdf_local(bytes: Bytes) -> Result<String, ExtractionError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))?
        .map_err(|e| {
            warn!("pdf-extract failed: {e}");
            ExtractionError::Pdf(e.to_string())
        })?;
    info!("Extracted {} characters from PDF", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind_by_extension() {
        assert_eq!(detect_kind("CV.PDF", None), Some(DocumentKind::Pdf));
        assert_eq!(detect_kind("cv.docx", None), Some(DocumentKind::Docx));
        assert_eq!(detect_kind("jd.txt", None), Some(DocumentKind::Text));
        assert_eq!(detect_kind("image.png", Some("image/png")), None);
    }

    #[test]
    fn test_detect_kind_by_content_type() {
        assert_eq!(
            detect_kind("upload", Some("application/pdf")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            detect_kind("upload", Some("text/plain")),
            Some(DocumentKind::Text)
        );
    }

    #[tokio::test]
    async fn test_plain_text_is_decoded_locally() {
        let extractor = TextExtractor::new(reqwest::Client::new(), None);
        let text = extractor
            .extract("jd.txt", None, Bytes::from_static(b"Senior Rust Engineer"))
            .await
            .unwrap();
        assert_eq!(text, "Senior Rust Engineer");
    }

    #[tokio::test]
    async fn test_unsupported_file_is_rejected() {
        let extractor = TextExtractor::new(reqwest::Client::new(), None);
        let err = extractor
            .extract("photo.png", Some("image/png"), Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Unsupported(_)));
    }

    #[tokio::test]
    async fn test_docx_without_service_is_unsupported() {
        let extractor = TextExtractor::new(reqwest::Client::new(), None);
        let err = extractor
            .extract("cv.docx", None, Bytes::from_static(b"PK"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Unsupported(_)));
    }

    #[tokio::test]
    async fn test_garbage_pdf_fails_to_parse() {
        let extractor = TextExtractor::new(reqwest::Client::new(), None);
        let err = extractor
            .extract("cv.pdf", None, Bytes::from_static(b"definitely not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Pdf(_) | ExtractionError::Task(_)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_reports_not_running() {
        let extractor = TextExtractor::new(
            reqwest::Client::new(),
            Some("http://127.0.0.1:1/extract-text".to_string()),
        );
        let err = extractor
            .extract("cv.pdf", None, Bytes::from_static(b"%PDF-1.4"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::ServiceUnavailable(_)));
    }
}
