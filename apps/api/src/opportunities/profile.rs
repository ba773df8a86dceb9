use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSkills {
    #[serde(default)]
    pub programming_languages: Vec<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileExperience {
    #[serde(default)]
    pub project_count: u32,
    #[serde(default)]
    pub internship_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentScores {
    #[serde(default)]
    pub aptitude: f64,
    #[serde(default)]
    pub technical: f64,
    #[serde(default)]
    pub case_study: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoftSkills {
    #[serde(default)]
    pub communication: f64,
    #[serde(default)]
    pub problem_solving: f64,
    #[serde(default)]
    pub adaptability: f64,
    #[serde(default)]
    pub knowledge_depth: f64,
}

/// What the student tells us about themselves when asking for opportunities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(default)]
    pub skills: ProfileSkills,
    #[serde(default)]
    pub experience: ProfileExperience,
    #[serde(default)]
    pub scores: AssessmentScores,
    #[serde(default)]
    pub soft_skills: SoftSkills,
}

const QUERY_SKILLS: usize = 3;

impl StudentProfile {
    /// Web search query focused on the first three languages and frameworks.
    pub fn search_query(&self) -> String {
        let focus = self
            .skills
            .programming_languages
            .iter()
            .chain(&self.skills.frameworks)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .take(QUERY_SKILLS)
            .collect::<Vec<_>>()
            .join(" ");
        let focus = if focus.is_empty() { "cs students" } else { focus.as_str() };

        format!("upcoming hackathons and internships for {focus} 2025 2026 apply now in maharashtra")
    }
}
