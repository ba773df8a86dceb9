use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::{extract_json_array, CompletionRequest, LlmClient};
use crate::quiz::bank::fallback_questions;
use crate::quiz::prompts::{ANALYTICAL_QUIZ_PROMPT, TECHNICAL_QUIZ_PROMPT};

pub const QUIZ_LENGTH: usize = 5;
pub const OPTIONS_PER_QUESTION: usize = 4;

/// A question before it is numbered into a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionDraft {
    pub fn is_well_formed(&self) -> bool {
        !self.question.trim().is_empty()
            && self.options.len() == OPTIONS_PER_QUESTION
            && self.correct_answer < self.options.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    #[serde(flatten)]
    pub draft: QuestionDraft,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    #[serde(rename = "type")]
    pub quiz_type: String,
    pub questions: Vec<QuizQuestion>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

pub fn is_technical(quiz_type: &str) -> bool {
    quiz_type == "technical"
}

pub fn build_prompt(quiz_type: &str, skills: &[String]) -> String {
    if is_technical(quiz_type) {
        let skills = if skills.is_empty() {
            "general software engineering".to_string()
        } else {
            skills.join(", ")
        };
        TECHNICAL_QUIZ_PROMPT.replace("{skills}", &skills)
    } else {
        ANALYTICAL_QUIZ_PROMPT.to_string()
    }
}

/// Pulls well-formed questions out of a model response. `None` when nothing
/// usable is found.
pub fn parse_questions(text: &str) -> Option<Vec<QuestionDraft>> {
    let json = extract_json_array(text).unwrap_or(text);
    let items: Vec<serde_json::Value> = serde_json::from_str(json).ok()?;

    let drafts: Vec<QuestionDraft> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<QuestionDraft>(item).ok())
        .filter(QuestionDraft::is_well_formed)
        .collect();

    (!drafts.is_empty()).then_some(drafts)
}

/// Pads with `fallback[len % fallback.len()]` until there are five, then
/// drops any extras.
pub fn normalize_to_five(mut drafts: Vec<QuestionDraft>, fallback: &[QuestionDraft]) -> Vec<QuestionDraft> {
    if drafts.len() < QUIZ_LENGTH && !fallback.is_empty() {
        warn!("Got {} questions, padding with fallback", drafts.len());
        while drafts.len() < QUIZ_LENGTH {
            drafts.push(fallback[drafts.len() % fallback.len()].clone());
        }
    } else if drafts.len() > QUIZ_LENGTH {
        warn!("Got {} questions, trimming to {QUIZ_LENGTH}", drafts.len());
    }
    drafts.truncate(QUIZ_LENGTH);
    drafts
}

pub fn assemble_quiz(quiz_type: &str, drafts: Vec<QuestionDraft>, now: DateTime<Utc>) -> Quiz {
    Quiz {
        id: format!("quiz_{}", now.timestamp_millis()),
        quiz_type: quiz_type.to_string(),
        questions: drafts
            .into_iter()
            .enumerate()
            .map(|(idx, draft)| QuizQuestion {
                id: format!("q{}", idx + 1),
                draft,
            })
            .collect(),
        created_at: now,
    }
}

/// Generates a five-question quiz. Never fails: the fixed bank for the quiz
/// family stands in for anything the model gets wrong.
pub async fn generate_quiz(llm: &LlmClient, quiz_type: &str, skills: &[String]) -> Quiz {
    let fallback = fallback_questions(is_technical(quiz_type));
    let request = CompletionRequest::prompt(build_prompt(quiz_type, skills))
        .with_temperature(0.7)
        .with_sampling(0.8, 40);

    let drafts = match llm.call(&request).await {
        Ok(text) => match parse_questions(&text) {
            Some(drafts) => {
                info!("Parsed {} {quiz_type} questions from {}", drafts.len(), llm.model());
                drafts
            }
            None => {
                warn!("Unusable quiz response ({} chars), using fallback", text.len());
                fallback.clone()
            }
        },
        Err(e) => {
            warn!("Quiz generation failed, using fallback: {e}");
            fallback.clone()
        }
    };

    assemble_quiz(quiz_type, normalize_to_five(drafts, &fallback), Utc::now())
}
