//! Structured resume data and the slug ids its child rows are keyed by.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{CompletionRequest, LlmClient};
use crate::resume::prompts::EXTRACTION_PROMPT;

const MAX_ID_LEN: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Skill names grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsByCategory {
    #[serde(default)]
    pub frontend: Vec<String>,
    #[serde(default)]
    pub backend: Vec<String>,
    #[serde(default)]
    pub database: Vec<String>,
    #[serde(default)]
    pub ml: Vec<String>,
    #[serde(default)]
    pub devops: Vec<String>,
    #[serde(default)]
    pub corecs: Vec<String>,
}

impl SkillsByCategory {
    /// `(category, skills)` pairs in a fixed order.
    pub fn categories(&self) -> [(&'static str, &[String]); 6] {
        [
            ("frontend", self.frontend.as_slice()),
            ("backend", self.backend.as_slice()),
            ("database", self.database.as_slice()),
            ("ml", self.ml.as_slice()),
            ("devops", self.devops.as_slice()),
            ("corecs", self.corecs.as_slice()),
        ]
    }

    /// All skills across categories, blanks dropped, de-duplicated in
    /// first-seen order.
    pub fn flatten_unique(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.categories()
            .into_iter()
            .flat_map(|(_, skills)| skills.iter())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.to_string()))
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredResumeData {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub professional_summary: Option<String>,
    #[serde(default)]
    pub skills: SkillsByCategory,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
}

/// Asks Gemini for the structured form of a resume. `None` on any failure;
/// the caller treats a missing extraction as "nothing to save".
pub async fn extract_structured(llm: &LlmClient, resume_text: &str) -> Option<StructuredResumeData> {
    let prompt = EXTRACTION_PROMPT
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
        .replace("{resume_text}", resume_text);
    let request = CompletionRequest::prompt(prompt)
        .with_system(JSON_ONLY_SYSTEM)
        .json();

    match llm.call_json::<StructuredResumeData>(&request).await {
        Ok(data) => {
            info!(
                "Structured extraction: {} skills, {} projects, {} roles, {} schools",
                data.skills.flatten_unique().len(),
                data.projects.len(),
                data.experience.len(),
                data.education.len()
            );
            Some(data)
        }
        Err(e) => {
            warn!("Structured resume extraction failed: {e}");
            None
        }
    }
}

fn replace_non_alnum(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '_' })
        .collect()
}

fn truncate(mut id: String) -> String {
    if let Some((idx, _)) = id.char_indices().nth(MAX_ID_LEN) {
        id.truncate(idx);
    }
    id
}

/// `"Node.js "` → `"node_js"`. Runs of `_` are collapsed.
pub fn skill_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    for c in replace_non_alnum(name).chars() {
        if c == '_' && id.ends_with('_') {
            continue;
        }
        id.push(c);
    }
    id
}

pub fn project_id(title: &str) -> String {
    truncate(replace_non_alnum(title))
}

pub fn experience_id(company: &str, role: &str) -> String {
    truncate(replace_non_alnum(&format!("{company}_{role}")))
}

pub fn education_id(institution: &str, degree: &str) -> String {
    truncate(replace_non_alnum(&format!("{institution}_{degree}")))
}

/// Missing or blank values become `fallback`.
pub fn or_default<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_id_collapses_underscores() {
        assert_eq!(skill_id("Node.js"), "node_js");
        assert_eq!(skill_id("  C++  "), "c_");
        assert_eq!(skill_id("CI / CD"), "ci_cd");
    }

    #[test]
    fn test_project_id_keeps_runs_and_truncates() {
        assert_eq!(project_id("My  App!"), "my__app_");
        let long = "a".repeat(80);
        assert_eq!(project_id(&long).len(), 50);
    }

    #[test]
    fn test_experience_and_education_ids() {
        assert_eq!(experience_id("Acme Corp", "SDE Intern"), "acme_corp_sde_intern");
        assert_eq!(
            education_id("IIT Bombay", "B.Tech"),
            "iit_bombay_b_tech"
        );
    }

    #[test]
    fn test_or_default() {
        assert_eq!(or_default(None, "Unknown"), "Unknown");
        assert_eq!(or_default(Some("  "), "Untitled"), "Untitled");
        assert_eq!(or_default(Some(" Acme "), "Unknown"), "Acme");
    }

    #[test]
    fn test_flatten_unique_preserves_first_seen_order() {
        let skills = SkillsByCategory {
            frontend: vec!["React".into(), "TypeScript".into()],
            backend: vec!["Rust".into(), "TypeScript".into(), "".into()],
            devops: vec!["Docker".into()],
            ..Default::default()
        };
        assert_eq!(
            skills.flatten_unique(),
            vec!["React", "TypeScript", "Rust", "Docker"]
        );
    }

    #[test]
    fn test_structured_data_tolerates_missing_sections() {
        let data: StructuredResumeData =
            serde_json::from_str(r#"{"personal_info": {"full_name": "Asha"}, "skills": {"ml": ["PyTorch"]}}"#)
                .unwrap();
        assert_eq!(data.personal_info.full_name.as_deref(), Some("Asha"));
        assert_eq!(data.skills.ml, vec!["PyTorch"]);
        assert!(data.projects.is_empty());
    }
}
