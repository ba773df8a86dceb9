//! Wire types for OpenAI-compatible `/chat/completions` endpoints (Groq, xAI).

use serde::{Deserialize, Serialize};

use super::{CompletionRequest, Role};

#[derive(Debug, Serialize)]
pub(super) struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> ChatCompletionRequest<'a> {
    pub(super) fn from_request(model: &'a str, request: &'a CompletionRequest) -> Self {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = request.system.as_deref() {
            messages.push(WireMessage {
                role: Role::System,
                content: system,
            });
        }
        messages.extend(request.messages.iter().map(|m| WireMessage {
            role: m.role,
            content: &m.content,
        }));

        Self {
            model,
            messages,
            temperature: request.temperature,
            top_p: request.top_p,
            max_tokens: request.max_tokens,
            response_format: request
                .json_mode
                .then_some(ResponseFormat { kind: "json_object" }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

impl ChatCompletionResponse {
    pub(super) fn text(&self) -> Option<String> {
        self.choices.first()?.message.content.clone()
    }

    pub(super) fn token_counts(&self) -> (u32, u32) {
        self.usage
            .as_ref()
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_is_prepended() {
        let req = CompletionRequest::prompt("question")
            .with_system("You are a recruiter")
            .with_temperature(0.8)
            .with_max_tokens(300);
        let body =
            serde_json::to_value(ChatCompletionRequest::from_request("grok-beta", &req)).unwrap();

        assert_eq!(body["model"], "grok-beta");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "question");
        assert_eq!(body["max_tokens"], 300);
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn test_json_mode_sets_response_format() {
        let req = CompletionRequest::prompt("parse").json();
        let body = serde_json::to_value(ChatCompletionRequest::from_request(
            "llama-3.3-70b-versatile",
            &req,
        ))
        .unwrap();
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_response_text_and_usage() {
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": "[1,2]"}}],
            "usage": {"prompt_tokens": 40, "completion_tokens": 5, "total_tokens": 45}
        }"#;
        let resp: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text().as_deref(), Some("[1,2]"));
        assert_eq!(resp.token_counts(), (40, 5));
    }
}
