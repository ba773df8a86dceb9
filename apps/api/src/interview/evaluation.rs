//! Heuristic interview scoring from answer length, sampled anxiety and
//! how many questions were answered.

use serde::{Deserialize, Serialize};

use crate::interview::questions::INTERVIEW_LENGTH;
use crate::scoring::competency::round_half_up;

/// A finished interview as recorded by the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSession {
    #[serde(default)]
    pub answers: Vec<String>,
    /// One averaged anxiety sample (0.0–1.0) per answer.
    #[serde(default)]
    pub anxiety_levels: Vec<f64>,
    /// Epoch millis.
    pub start_time: i64,
    #[serde(default)]
    pub end_time: Option<i64>,
    /// Topics the student asked to practise; named in the feedback.
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

impl InterviewSession {
    /// Whole minutes between start and end, 0 if the end is unknown.
    pub fn duration_minutes(&self) -> i64 {
        self.end_time
            .map(|end| round_half_up((end - self.start_time).max(0) as f64 / 60_000.0) as i64)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewMetrics {
    pub overall_score: i32,
    pub technical_accuracy: i32,
    pub communication_clarity: i32,
    pub confidence: i32,
    pub completeness: i32,
    pub strengths: Vec<&'static str>,
    pub improvements: Vec<String>,
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        0.0
    } else {
        values.sum::<f64>() / n as f64
    }
}

fn technical_improvement(weaknesses: &[String]) -> String {
    let topics: Vec<&str> = weaknesses
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect();
    if topics.is_empty() {
        "Deepen technical knowledge in weak areas".to_string()
    } else {
        format!("Deepen technical knowledge in {}", topics.join(", "))
    }
}

pub fn evaluate(session: &InterviewSession) -> InterviewMetrics {
    let avg_words = mean(
        session
            .answers
            .iter()
            .map(|a| a.split_whitespace().count() as f64),
    );
    let avg_anxiety = mean(session.anxiety_levels.iter().copied());

    // 30 words per answer scores full marks.
    let technical = (avg_words / 30.0 * 100.0).clamp(40.0, 100.0);
    let communication = if avg_words > 15.0 && avg_words < 100.0 {
        85.0
    } else {
        65.0
    };
    let confidence = (100.0 - avg_anxiety * 100.0).clamp(0.0, 100.0);
    let completeness =
        (session.answers.len() as f64 / INTERVIEW_LENGTH as f64 * 100.0).clamp(0.0, 100.0);

    let overall = technical * 0.35 + communication * 0.25 + confidence * 0.25 + completeness * 0.15;

    let mut strengths = Vec::new();
    if confidence > 75.0 {
        strengths.push("Maintained composure and confidence");
    }
    if avg_words > 25.0 {
        strengths.push("Provided detailed responses");
    }
    if completeness >= 100.0 {
        strengths.push("Answered all questions");
    }

    let mut improvements = Vec::new();
    if confidence < 60.0 {
        improvements.push("Practice staying calm during interviews".to_string());
    }
    if avg_words < 20.0 {
        improvements.push("Provide more detailed explanations".to_string());
    }
    if technical < 70.0 {
        improvements.push(technical_improvement(&session.weaknesses));
    }

    InterviewMetrics {
        overall_score: round_half_up(overall),
        technical_accuracy: round_half_up(technical),
        communication_clarity: round_half_up(communication),
        confidence: round_half_up(confidence),
        completeness: round_half_up(completeness),
        strengths,
        improvements,
    }
}
