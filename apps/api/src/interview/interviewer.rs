use serde::Serialize;
use tracing::{info, warn};

use crate::interview::questions::{question_for, CLOSING_MESSAGE, INTERVIEW_LENGTH};
use crate::llm_client::{ChatMessage, CompletionRequest, LlmClient, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Model,
    QuestionBank,
    Closing,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewerReply {
    pub reply: String,
    pub source: ReplySource,
    /// Set once the candidate has answered every question.
    pub done: bool,
}

fn strategy_for(anxiety: f64) -> &'static str {
    if anxiety > 0.6 {
        "- The candidate is showing high anxiety. Maintain pressure but be slightly more encouraging to keep them engaged."
    } else if anxiety > 0.3 {
        "- The candidate is moderately anxious. Push harder on their weak areas with follow-up questions."
    } else {
        "- The candidate appears calm. Increase difficulty and ask deep, probing questions about their weaknesses."
    }
}

pub fn build_system_prompt(weaknesses: &[String], anxiety: f64) -> String {
    let joined = weaknesses.join(", ");
    let (weak_label, focus) = if joined.trim().is_empty() {
        ("General technical knowledge".to_string(), "technical fundamentals".to_string())
    } else {
        (joined.clone(), joined)
    };

    let strategy = strategy_for(anxiety);
    format!(
        "You are a High-Pressure Technical Recruiter conducting a challenging mock interview.

Your goal is to test the candidate rigorously while adapting to their stress levels.

CANDIDATE PROFILE:
- Identified Weaknesses: {weak_label}
- Current Anxiety Level: {anxiety:.2} (0 = calm, 1 = highly anxious)

INTERVIEW STRATEGY:
{strategy}

RULES:
1. Focus heavily on their identified weaknesses ({focus})
2. Ask follow-up questions that expose gaps in understanding
3. Be direct and professional, like a real technical interviewer
4. If they struggle, ask clarifying questions before moving on
5. Occasionally throw in curveball questions related to their weak areas
6. Keep responses CONCISE and interview-like (not conversational) - your responses will be spoken aloud
7. Use SHORT, CLEAR sentences optimized for text-to-speech
8. End each response with ONE challenging question

Begin the interview now."
    )
}

/// Produces the interviewer's next turn.
///
/// After the last answer the fixed closing message is returned. Otherwise
/// xAI is asked for an adaptive follow-up; if that fails the next question
/// from the topic pool is used.
pub async fn interviewer_turn(
    llm: &LlmClient,
    messages: &[ChatMessage],
    weaknesses: &[String],
    anxiety: f64,
) -> InterviewerReply {
    let answered = messages.iter().filter(|m| m.role == Role::User).count();
    if answered >= INTERVIEW_LENGTH {
        return InterviewerReply {
            reply: CLOSING_MESSAGE.to_string(),
            source: ReplySource::Closing,
            done: true,
        };
    }

    // Client-supplied system turns are dropped; the system prompt is ours.
    let conversation: Vec<ChatMessage> = messages
        .iter()
        .filter(|m| m.role != Role::System)
        .cloned()
        .collect();
    let anxiety = anxiety.clamp(0.0, 1.0);
    let request = CompletionRequest::conversation(build_system_prompt(weaknesses, anxiety), conversation)
        .with_temperature(0.8)
        .with_max_tokens(300);

    match llm.call(&request).await {
        Ok(text) => {
            info!("Interviewer turn {} from {} (anxiety {anxiety:.2})", answered + 1, llm.model());
            InterviewerReply {
                reply: text.trim().to_string(),
                source: ReplySource::Model,
                done: false,
            }
        }
        Err(e) => {
            warn!("Interviewer model unavailable, using question pool: {e}");
            InterviewerReply {
                reply: question_for(weaknesses, answered).to_string(),
                source: ReplySource::QuestionBank,
                done: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::Provider;

    #[test]
    fn test_strategy_thresholds() {
        assert!(strategy_for(0.61).contains("high anxiety"));
        assert!(strategy_for(0.6).contains("moderately anxious"));
        assert!(strategy_for(0.31).contains("moderately anxious"));
        assert!(strategy_for(0.3).contains("appears calm"));
    }

    #[test]
    fn test_prompt_defaults_without_weaknesses() {
        let prompt = build_system_prompt(&[], 0.123);
        assert!(prompt.contains("Identified Weaknesses: General technical knowledge"));
        assert!(prompt.contains("Current Anxiety Level: 0.12"));
        assert!(prompt.contains("weaknesses (technical fundamentals)"));
    }

    #[test]
    fn test_prompt_lists_weaknesses() {
        let prompt = build_system_prompt(&["React".to_string(), "SQL".to_string()], 0.7);
        assert!(prompt.contains("Identified Weaknesses: React, SQL"));
        assert!(prompt.contains("slightly more encouraging"));
    }

    #[test]
    fn test_prompt_keeps_braces_in_weaknesses_literal() {
        let weakness = "templates like {strategy} and {focus}".to_string();
        let prompt = build_system_prompt(&[weakness], 0.1);
        assert!(prompt.contains("Identified Weaknesses: templates like {strategy} and {focus}"));
        assert!(prompt.contains("weaknesses (templates like {strategy} and {focus})"));
        assert_eq!(prompt.matches("appears calm").count(), 1);
    }

    #[tokio::test]
    async fn test_falls_back_to_pool_question() {
        let llm = LlmClient::new(Provider::Xai, None).unwrap();
        let messages = vec![ChatMessage::user("I built a todo app")];
        let reply = interviewer_turn(&llm, &messages, &["react".to_string()], 0.2).await;
        assert_eq!(reply.source, ReplySource::QuestionBank);
        assert_eq!(reply.reply, question_for(&["react".to_string()], 1));
        assert!(!reply.done);
    }

    #[tokio::test]
    async fn test_closes_after_last_answer() {
        let llm = LlmClient::new(Provider::Xai, None).unwrap();
        let messages: Vec<_> = (0..INTERVIEW_LENGTH)
            .map(|i| ChatMessage::user(format!("answer {i}")))
            .collect();
        let reply = interviewer_turn(&llm, &messages, &[], 0.0).await;
        assert!(reply.done);
        assert_eq!(reply.source, ReplySource::Closing);
    }
}
