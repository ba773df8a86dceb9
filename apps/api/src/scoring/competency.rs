//! Competency score: a weighted blend of the resume baseline, the quiz
//! average, and the interview average.
//!
//! Weights depend on which activities the student has completed; an activity
//! that has never been done hands its weight to the others:
//!
//! | completed          | resume | quiz | interview |
//! |--------------------|--------|------|-----------|
//! | quiz + interview   | 0.4    | 0.3  | 0.3       |
//! | quiz only          | 0.6    | 0.4  | –         |
//! | interview only     | 0.6    | –    | 0.4       |
//! | neither            | 1.0    | –    | –         |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Quiz,
    Interview,
}

impl ActivityType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Quiz => "quiz",
            ActivityType::Interview => "interview",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "quiz" => Some(ActivityType::Quiz),
            "interview" => Some(ActivityType::Interview),
            _ => None,
        }
    }
}

/// Per-source sub-scores, each 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub resume: i32,
    pub quiz_avg: i32,
    pub interview_avg: i32,
}

impl Default for Scores {
    /// Baseline for a student who has not had a resume analyzed yet.
    fn default() -> Self {
        Self {
            resume: 50,
            quiz_avg: 0,
            interview_avg: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub score: i32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub resume: f64,
    pub quiz: f64,
    pub interview: f64,
}

pub fn weights_for(has_quiz: bool, has_interview: bool) -> BlendWeights {
    match (has_quiz, has_interview) {
        (true, true) => BlendWeights {
            resume: 0.4,
            quiz: 0.3,
            interview: 0.3,
        },
        (true, false) => BlendWeights {
            resume: 0.6,
            quiz: 0.4,
            interview: 0.0,
        },
        (false, true) => BlendWeights {
            resume: 0.6,
            quiz: 0.0,
            interview: 0.4,
        },
        (false, false) => BlendWeights {
            resume: 1.0,
            quiz: 0.0,
            interview: 0.0,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompetencyUpdate {
    pub scores: Scores,
    pub competency_score: i32,
}

/// Rounds half-up, matching how scores have always been displayed.
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Rounded mean of all history entries of `kind`, or `None` if there are none.
pub fn average_for(history: &[ActivityEntry], kind: ActivityType) -> Option<i32> {
    let (sum, count) = history
        .iter()
        .filter(|h| h.activity_type == kind)
        .fold((0_i64, 0_i64), |(sum, count), h| {
            (sum + h.score as i64, count + 1)
        });
    (count > 0).then(|| round_half_up(sum as f64 / count as f64))
}

/// Blends sub-scores using the weights implied by the history. Always 0–100.
pub fn competency_for(scores: &Scores, history: &[ActivityEntry]) -> i32 {
    let has_quiz = history
        .iter()
        .any(|h| h.activity_type == ActivityType::Quiz);
    let has_interview = history
        .iter()
        .any(|h| h.activity_type == ActivityType::Interview);

    if !has_quiz && !has_interview {
        return scores.resume.clamp(0, 100);
    }

    let w = weights_for(has_quiz, has_interview);
    let blended = scores.resume as f64 * w.resume
        + scores.quiz_avg as f64 * w.quiz
        + scores.interview_avg as f64 * w.interview;
    round_half_up(blended).clamp(0, 100)
}

/// Recomputes sub-scores and the competency score after a new activity.
///
/// `history` must already include the new entry. Only the average of the
/// submitted activity type is recomputed; the other sub-scores are kept.
pub fn apply_activity(
    scores: Scores,
    history: &[ActivityEntry],
    kind: ActivityType,
) -> CompetencyUpdate {
    let mut updated = scores;
    if let Some(avg) = average_for(history, kind) {
        match kind {
            ActivityType::Quiz => updated.quiz_avg = avg,
            ActivityType::Interview => updated.interview_avg = avg,
        }
    }

    CompetencyUpdate {
        scores: updated,
        competency_score: competency_for(&updated, history),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: ActivityType, score: i32) -> ActivityEntry {
        ActivityEntry {
            activity_type: kind,
            score,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_default_scores_baseline() {
        let s = Scores::default();
        assert_eq!((s.resume, s.quiz_avg, s.interview_avg), (50, 0, 0));
    }

    #[test]
    fn test_resume_only_is_resume_score() {
        let scores = Scores {
            resume: 72,
            ..Default::default()
        };
        assert_eq!(competency_for(&scores, &[]), 72);
    }

    #[test]
    fn test_first_quiz_uses_60_40_split() {
        let scores = Scores {
            resume: 70,
            ..Default::default()
        };
        let history = vec![entry(ActivityType::Quiz, 80)];
        let update = apply_activity(scores, &history, ActivityType::Quiz);
        assert_eq!(update.scores.quiz_avg, 80);
        // 0.6*70 + 0.4*80 = 42 + 32 = 74
        assert_eq!(update.competency_score, 74);
    }

    #[test]
    fn test_first_interview_uses_60_40_split() {
        let scores = Scores {
            resume: 60,
            ..Default::default()
        };
        let history = vec![entry(ActivityType::Interview, 45)];
        let update = apply_activity(scores, &history, ActivityType::Interview);
        assert_eq!(update.scores.interview_avg, 45);
        // 0.6*60 + 0.4*45 = 36 + 18 = 54
        assert_eq!(update.competency_score, 54);
    }

    #[test]
    fn test_all_three_uses_40_30_30_split() {
        let scores = Scores {
            resume: 80,
            quiz_avg: 60,
            interview_avg: 0,
        };
        let history = vec![
            entry(ActivityType::Quiz, 60),
            entry(ActivityType::Interview, 70),
        ];
        let update = apply_activity(scores, &history, ActivityType::Interview);
        // 0.4*80 + 0.3*60 + 0.3*70 = 32 + 18 + 21 = 71
        assert_eq!(update.competency_score, 71);
        assert_eq!(update.scores.quiz_avg, 60);
        assert_eq!(update.scores.interview_avg, 70);
    }

    #[test]
    fn test_average_rounds_half_up() {
        let history = vec![entry(ActivityType::Quiz, 60), entry(ActivityType::Quiz, 81)];
        // 70.5 → 71
        assert_eq!(average_for(&history, ActivityType::Quiz), Some(71));
        assert_eq!(average_for(&history, ActivityType::Interview), None);
    }

    #[test]
    fn test_only_submitted_type_is_recomputed() {
        let scores = Scores {
            resume: 50,
            quiz_avg: 10,
            interview_avg: 33,
        };
        let history = vec![
            entry(ActivityType::Interview, 90),
            entry(ActivityType::Quiz, 40),
        ];
        let update = apply_activity(scores, &history, ActivityType::Quiz);
        assert_eq!(update.scores.quiz_avg, 40);
        assert_eq!(update.scores.interview_avg, 33);
    }

    #[test]
    fn test_competency_stays_within_bounds() {
        let high = Scores {
            resume: 100,
            quiz_avg: 100,
            interview_avg: 100,
        };
        let history = vec![
            entry(ActivityType::Quiz, 100),
            entry(ActivityType::Interview, 100),
        ];
        assert_eq!(competency_for(&high, &history), 100);

        let low = Scores {
            resume: 0,
            quiz_avg: 0,
            interview_avg: 0,
        };
        assert_eq!(competency_for(&low, &history), 0);
    }

    #[test]
    fn test_weights_sum_to_one() {
        for (q, i) in [(true, true), (true, false), (false, true), (false, false)] {
            let w = weights_for(q, i);
            assert!((w.resume + w.quiz + w.interview - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_activity_type_parse() {
        assert_eq!(ActivityType::parse("quiz"), Some(ActivityType::Quiz));
        assert_eq!(ActivityType::parse("interview"), Some(ActivityType::Interview));
        assert_eq!(ActivityType::parse("resume"), None);
    }

    #[test]
    fn test_activity_entry_serializes_type_field() {
        let json = serde_json::to_value(entry(ActivityType::Quiz, 5)).unwrap();
        assert_eq!(json["type"], "quiz");
        assert_eq!(json["score"], 5);
    }
}
