use std::collections::HashMap;

use serde::Serialize;

use crate::quiz::generator::Quiz;
use crate::scoring::competency::round_half_up;

#[derive(Debug, Clone, Serialize)]
pub struct QuestionReview {
    pub id: String,
    pub question: String,
    pub selected: Option<usize>,
    pub correct_answer: usize,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizGrade {
    pub correct: usize,
    pub total: usize,
    pub percentage: i32,
    pub label: &'static str,
    pub review: Vec<QuestionReview>,
}

pub fn score_label(percentage: i32) -> &'static str {
    match percentage {
        p if p >= 80 => "EXCELLENT",
        p if p >= 60 => "GOOD",
        p if p >= 40 => "FAIR",
        _ => "NEEDS IMPROVEMENT",
    }
}

/// Grades submitted answers (question id → option index). Unanswered
/// questions count as wrong.
pub fn grade_quiz(quiz: &Quiz, answers: &HashMap<String, usize>) -> QuizGrade {
    let review: Vec<QuestionReview> = quiz
        .questions
        .iter()
        .map(|q| {
            let selected = answers.get(&q.id).copied();
            QuestionReview {
                id: q.id.clone(),
                question: q.draft.question.clone(),
                selected,
                correct_answer: q.draft.correct_answer,
                is_correct: selected == Some(q.draft.correct_answer),
                explanation: q.draft.explanation.clone(),
            }
        })
        .collect();

    let total = review.len();
    let correct = review.iter().filter(|r| r.is_correct).count();
    let percentage = if total == 0 {
        0
    } else {
        round_half_up(correct as f64 / total as f64 * 100.0)
    };

    QuizGrade {
        correct,
        total,
        percentage,
        label: score_label(percentage),
        review,
    }
}
