use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{extract_json_array, strip_json_fences, CompletionRequest, LlmClient};
use crate::skillgap::prompts::COURSES_PROMPT;

pub const MAX_COURSES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub platform: String,
    pub url: String,
}

pub fn parse_courses(text: &str) -> Result<Vec<Course>, serde_json::Error> {
    let text = strip_json_fences(text);
    let json = extract_json_array(text).unwrap_or(text);
    let mut courses: Vec<Course> = serde_json::from_str(json)?;
    courses.retain(|c| !c.title.trim().is_empty() && !c.url.trim().is_empty());
    courses.truncate(MAX_COURSES);
    Ok(courses)
}

/// Top online courses for an upskilling module. Unlike the other Groq
/// features there is no fallback list.
pub async fn recommend_courses(llm: &LlmClient, module: &str) -> Result<Vec<Course>, AppError> {
    let request = CompletionRequest::prompt(COURSES_PROMPT.replace("{module}", module));

    let text = llm
        .call(&request)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to fetch course recommendations: {e}")))?;
    let courses = parse_courses(&text)
        .map_err(|e| AppError::Llm(format!("Failed to fetch course recommendations: {e}")))?;

    info!("Recommended {} courses for {module}", courses.len());
    Ok(courses)
}
