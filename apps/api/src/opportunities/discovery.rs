//! Opportunity discovery: live web search followed by LLM extraction that is
//! restricted to what the search results actually say.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{extract_json_object, strip_json_fences, CompletionRequest, LlmClient};
use crate::opportunities::profile::StudentProfile;
use crate::opportunities::prompts::OPPORTUNITY_EXTRACTION_PROMPT;
use crate::search::{SearchClient, SearchOptions, SearchResult};

const MAX_PER_KIND: usize = 3;

fn not_specified() -> String {
    "not specified".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSummary {
    #[serde(default = "not_specified")]
    pub inferred_level: String,
    #[serde(default = "not_specified")]
    pub primary_domain: String,
    #[serde(default)]
    pub justification: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hackathon {
    pub name: String,
    #[serde(default = "not_specified")]
    pub theme_or_focus: String,
    #[serde(default = "not_specified")]
    pub level: String,
    #[serde(default = "not_specified")]
    pub mode: String,
    #[serde(default = "not_specified")]
    pub location: String,
    #[serde(default = "not_specified")]
    pub eligibility: String,
    #[serde(default)]
    pub key_skills_mentioned: Vec<String>,
    #[serde(default = "not_specified")]
    pub official_link: String,
    #[serde(default)]
    pub source_title: String,
    #[serde(default)]
    pub why_this_matches_student: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Internship {
    pub organization: String,
    #[serde(default = "not_specified")]
    pub role: String,
    #[serde(default = "not_specified")]
    pub level: String,
    #[serde(default = "not_specified")]
    pub location: String,
    #[serde(default = "not_specified")]
    pub duration: String,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default = "not_specified")]
    pub official_link: String,
    #[serde(default)]
    pub source_title: String,
    #[serde(default)]
    pub why_this_matches_student: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityReport {
    #[serde(default)]
    pub profile_summary: ProfileSummary,
    #[serde(default)]
    pub hackathons: Vec<Hackathon>,
    #[serde(default)]
    pub internships: Vec<Internship>,
    #[serde(default)]
    pub confidence_score: f64,
}

/// A search hit in the shape the extraction prompt expects.
#[derive(Debug, Serialize)]
struct WebResult<'a> {
    title: &'a str,
    url: &'a str,
    content: &'a str,
}

pub fn build_prompt(profile: &StudentProfile, results: &[SearchResult]) -> String {
    let web: Vec<WebResult> = results
        .iter()
        .map(|r| WebResult {
            title: &r.title,
            url: &r.url,
            content: &r.content,
        })
        .collect();

    OPPORTUNITY_EXTRACTION_PROMPT
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
        .replace(
            "{student_profile}",
            &serde_json::to_string_pretty(profile).unwrap_or_default(),
        )
        .replace(
            "{search_results}",
            &serde_json::to_string_pretty(&web).unwrap_or_default(),
        )
}

/// Parses the model's report, capping each list and the confidence score.
pub fn parse_report(text: &str) -> Result<OpportunityReport, serde_json::Error> {
    let text = strip_json_fences(text);
    let json = extract_json_object(text).unwrap_or(text);
    let mut report: OpportunityReport = serde_json::from_str(json)?;

    report.hackathons.truncate(MAX_PER_KIND);
    report.internships.truncate(MAX_PER_KIND);
    report.confidence_score = report.confidence_score.clamp(0.0, 100.0);
    Ok(report)
}

pub async fn discover_opportunities(
    search: &SearchClient,
    llm: &LlmClient,
    profile: &StudentProfile,
) -> Result<OpportunityReport, AppError> {
    let query = profile.search_query();
    info!("Searching opportunities: {query}");

    let response = search.search(&query, &SearchOptions::default()).await?;
    if response.results.is_empty() {
        warn!("Opportunity search returned no results");
    }

    let request = CompletionRequest::prompt(build_prompt(profile, &response.results))
        .with_system(JSON_ONLY_SYSTEM);
    let text = llm.call(&request).await?;

    let report = parse_report(&text)
        .map_err(|e| AppError::Llm(format!("Invalid JSON response from LLM: {e}")))?;
    info!(
        "Extracted {} hackathons and {} internships (confidence {})",
        report.hackathons.len(),
        report.internships.len(),
        report.confidence_score
    );
    Ok(report)
}
