use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only `DATABASE_URL` is required; provider keys are optional and features
/// fall back to local behaviour when a key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub xai_api_key: Option<String>,
    pub tavily_api_key: Option<String>,
    /// Remote text-extraction service. When unset, PDFs are parsed in-process.
    pub text_extractor_url: Option<String>,
    /// Resume uploads are stored here when set.
    pub s3_bucket: Option<String>,
    pub s3_endpoint: Option<String>,
    pub interview_log_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let xai_api_key = optional_env("XAI_API_KEY");
        // The Groq endpoint historically accepted either key.
        let groq_api_key = optional_env("GROQ_API_KEY").or_else(|| xai_api_key.clone());

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            groq_api_key,
            xai_api_key,
            tavily_api_key: optional_env("TAVILY_API_KEY"),
            text_extractor_url: optional_env("TEXT_EXTRACTOR_URL"),
            s3_bucket: optional_env("S3_BUCKET"),
            s3_endpoint: optional_env("S3_ENDPOINT"),
            interview_log_dir: optional_env("INTERVIEW_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable; empty strings count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
