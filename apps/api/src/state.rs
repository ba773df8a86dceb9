use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::llm_client::LlmClient;
use crate::search::SearchClient;
use crate::skillgap::gap_analysis::GapAnalyzer;
use crate::storage::ResumeStorage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Resume analysis and quiz generation.
    pub gemini: LlmClient,
    /// JD parsing, gap analysis, courses and opportunity extraction.
    pub groq: LlmClient,
    /// Mock interviewer.
    pub xai: LlmClient,
    pub search: SearchClient,
    pub extractor: TextExtractor,
    /// `None` when no bucket is configured.
    pub storage: Option<ResumeStorage>,
    pub config: Config,
    pub gap_analyzer: Arc<dyn GapAnalyzer>,
}
