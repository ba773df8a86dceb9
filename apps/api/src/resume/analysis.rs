use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{CompletionRequest, LlmClient};
use crate::resume::prompts::ANALYSIS_PROMPT;

pub const MOCK_ANALYSIS_SOURCE: &str = "Mock Local System v1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

impl LabeledValue {
    fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Per-category skill counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillCounts {
    #[serde(default)]
    pub frontend: u32,
    #[serde(default)]
    pub backend: u32,
    #[serde(default)]
    pub database: u32,
    #[serde(default)]
    pub ml: u32,
    #[serde(default)]
    pub devops: u32,
    #[serde(default)]
    pub corecs: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extracted {
    #[serde(default)]
    pub skills: SkillCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graphs {
    #[serde(default)]
    pub skill_distribution: Vec<LabeledValue>,
    #[serde(default)]
    pub section_scores: Vec<LabeledValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub ats_score: f64,
    pub baseline_competency_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub extracted: Extracted,
    #[serde(default)]
    pub graphs: Graphs,
    #[serde(default = "default_source")]
    pub analysis_source: String,
}

fn default_source() -> String {
    "Ascendra Intelligence".to_string()
}

impl ResumeAnalysis {
    /// Baseline score as a whole number in 0–100, used as the resume sub-score.
    pub fn baseline_score(&self) -> i32 {
        crate::scoring::competency::round_half_up(self.baseline_competency_score.clamp(0.0, 100.0))
    }
}

/// Analyzes resume text with Gemini. Any provider or parse failure falls
/// back to [`mock_analysis`], so this never fails.
pub async fn analyze_resume(llm: &LlmClient, resume_text: &str) -> ResumeAnalysis {
    let request = CompletionRequest::prompt(ANALYSIS_PROMPT.replace("{resume_text}", resume_text))
        .with_system(JSON_ONLY_SYSTEM)
        .json();

    match llm.call_json::<ResumeAnalysis>(&request).await {
        Ok(analysis) => {
            info!(
                "Resume analyzed by {}: ats={}, baseline={}",
                llm.model(),
                analysis.ats_score,
                analysis.baseline_competency_score
            );
            analysis
        }
        Err(e) => {
            warn!("Resume analysis failed, using local heuristic: {e}");
            mock_analysis(resume_text)
        }
    }
}

/// Keyword heuristic used when the model is unavailable. Deterministic for a
/// given text.
pub fn mock_analysis(text: &str) -> ResumeAnalysis {
    let lower = text.to_lowercase();
    let has_experience = lower.contains("experience");
    let has_projects = lower.contains("project");
    let has_skills = lower.contains("skill");

    let base: f64 = if has_experience { 70.0 } else { 50.0 };
    let project_bonus = if has_projects { 10.0 } else { 0.0 };
    let skill_bonus = if has_skills { 15.0 } else { 0.0 };

    let pick = |flag: bool, yes: f64, no: f64| if flag { yes } else { no };

    ResumeAnalysis {
        ats_score: (base + 10.0).min(85.0),
        baseline_competency_score: (base + project_bonus + skill_bonus).min(75.0),
        strengths: vec![
            "Strong technical foundation in modern frameworks".to_string(),
            "Demonstrated project experience with real-world applications".to_string(),
            "Clear communication of technical concepts".to_string(),
            if has_experience {
                "Relevant industry experience documented"
            } else {
                "Academic projects showcase learning ability"
            }
            .to_string(),
        ],
        gaps: vec![
            if has_experience {
                "Could expand on leadership roles"
            } else {
                "Limited professional work experience"
            }
            .to_string(),
            "Missing quantified impact metrics in project descriptions".to_string(),
            "No mention of testing or quality assurance practices".to_string(),
            "Soft skills could be better highlighted".to_string(),
        ],
        suggestions: vec![
            "Add metrics: \"Improved performance by X%\", \"Reduced load time by Y seconds\""
                .to_string(),
            "Include open-source contributions or a portfolio link".to_string(),
            "Highlight collaboration and team ownership explicitly".to_string(),
            if has_skills {
                "Organize skills by proficiency level"
            } else {
                "Add a dedicated skills section"
            }
            .to_string(),
            "Add certifications or relevant coursework completion".to_string(),
        ],
        extracted: Extracted {
            skills: SkillCounts {
                frontend: if has_skills { 35 } else { 10 },
                backend: if has_skills { 27 } else { 8 },
                database: 17,
                ml: if has_projects { 14 } else { 3 },
                devops: 15,
                corecs: 24,
            },
        },
        graphs: Graphs {
            skill_distribution: vec![
                LabeledValue::new("Frontend", pick(has_skills, 55.0, 25.0)),
                LabeledValue::new("Backend", pick(has_skills, 42.0, 20.0)),
                LabeledValue::new("Database", 24.0),
                LabeledValue::new("ML/AI", pick(has_projects, 22.0, 8.0)),
                LabeledValue::new("DevOps", 24.0),
                LabeledValue::new("Core CS", 32.0),
            ],
            section_scores: vec![
                LabeledValue::new("Impact", 80.0),
                LabeledValue::new("Clarity", 82.0),
                LabeledValue::new("Structure", 85.0),
                LabeledValue::new("Keywords", pick(has_skills, 80.0, 60.0)),
            ],
        },
        analysis_source: MOCK_ANALYSIS_SOURCE.to_string(),
    }
}
