//! JD Parser: pulls the five most important skills out of a job description
//! and scores how strongly each one is required.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{extract_json_array, CompletionRequest, LlmClient};
use crate::skillgap::benchmarks::Benchmark;
use crate::skillgap::prompts::JD_BENCHMARK_PROMPT;

/// Only this many characters of the JD are sent to the model.
pub const MAX_JD_CHARS: usize = 15_000;
pub const TOP_SKILLS: usize = 5;

#[derive(Debug, Deserialize)]
struct RawBenchmark {
    skill: String,
    benchmark: f64,
}

/// Substituted whenever the model is unavailable or returns garbage.
pub fn fallback_benchmarks() -> Vec<Benchmark> {
    vec![
        Benchmark::new("JavaScript/TypeScript", 90),
        Benchmark::new("React.js", 85),
        Benchmark::new("Node.js", 80),
        Benchmark::new("System Design", 75),
        Benchmark::new("Communication", 70),
    ]
}

/// First `max` characters of `text`, respecting char boundaries.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Parses a `[{skill, benchmark}]` array embedded anywhere in `text`.
pub fn parse_benchmark_list(text: &str) -> Option<Vec<Benchmark>> {
    let json = extract_json_array(text)?;
    let raw: Vec<RawBenchmark> = serde_json::from_str(json).ok()?;

    let benchmarks: Vec<Benchmark> = raw
        .into_iter()
        .filter(|b| !b.skill.trim().is_empty())
        .take(TOP_SKILLS)
        .map(|b| Benchmark::new(b.skill.trim(), b.benchmark.round() as i32))
        .collect();

    (!benchmarks.is_empty()).then_some(benchmarks)
}

/// Rejects JDs that produced no text at all.
pub fn ensure_jd_text(text: &str) -> Result<&str, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Extracted text is empty".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Extracts the top skills from a JD via Groq, falling back to a fixed list.
pub async fn parse_jd_benchmarks(llm: &LlmClient, jd_text: &str) -> Vec<Benchmark> {
    let prompt = JD_BENCHMARK_PROMPT.replace("{jd_text}", truncate_chars(jd_text, MAX_JD_CHARS));

    match llm.call(&CompletionRequest::prompt(prompt)).await {
        Ok(text) => match parse_benchmark_list(&text) {
            Some(benchmarks) => {
                info!("Extracted {} JD benchmarks via {}", benchmarks.len(), llm.model());
                benchmarks
            }
            None => {
                warn!("JD benchmark response was not a skill array, using fallback list");
                fallback_benchmarks()
            }
        },
        Err(e) => {
            warn!("JD benchmark extraction failed, using fallback list: {e}");
            fallback_benchmarks()
        }
    }
}
