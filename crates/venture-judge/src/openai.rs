//! OpenAI-compatible chat completions client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use venture_config::JudgeConfig;
use venture_core::entities::ComparisonCandidate;

use crate::http::check_response;
use crate::parse::{parse_classification, parse_structured_content};
use crate::{Classification, ComponentBrief, Judge, JudgeError, Rubric, ScoringRequest, prompts};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn into_content(self) -> Result<String, JudgeError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| JudgeError::Malformed("completion has no content".into()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CandidateList {
    Wrapped {
        #[serde(alias = "benchmark_companies", alias = "candidates")]
        companies: Vec<ComparisonCandidate>,
    },
    Bare(Vec<ComparisonCandidate>),
}

/// Options for one completion call.
#[derive(Debug, Clone, Copy)]
struct CallOptions<'a> {
    model: &'a str,
    json: bool,
    max_tokens: Option<u32>,
    temperature: f32,
}

// ── Client ─────────────────────────────────────────────────────────

/// Judge backed by an OpenAI-compatible HTTP endpoint.
pub struct OpenAiJudge {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    scoring_model: String,
    temperature: f32,
    timeout_secs: u64,
}

impl OpenAiJudge {
    /// Build a client from the `[judge]` config section.
    ///
    /// # Errors
    ///
    /// Returns `JudgeError::NotConfigured` if no API key or base URL is set,
    /// and `JudgeError::Http` if the HTTP client cannot be built.
    pub fn new(config: &JudgeConfig) -> Result<Self, JudgeError> {
        if !config.is_configured() {
            return Err(JudgeError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent("venture/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            url: config.completions_url(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            scoring_model: config.scoring_model.clone(),
            temperature: config.temperature,
            timeout_secs: config.timeout_secs,
        })
    }

    fn options(&self, json: bool, max_tokens: Option<u32>) -> CallOptions<'_> {
        CallOptions {
            model: &self.model,
            json,
            max_tokens,
            temperature: self.temperature,
        }
    }

    async fn complete(&self, prompt: &str, opts: CallOptions<'_>) -> Result<String, JudgeError> {
        let body = build_request(prompt, opts);
        tracing::debug!(model = opts.model, json = opts.json, "judge request");

        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| JudgeError::from_transport(e, self.timeout_secs))?;
        let resp = check_response(resp).await?;
        let data: ChatResponse = resp
            .json()
            .await
            .map_err(|e| JudgeError::Malformed(format!("invalid completion body: {e}")))?;
        data.into_content()
    }
}

fn build_request<'a>(prompt: &'a str, opts: CallOptions<'a>) -> ChatRequest<'a> {
    ChatRequest {
        model: opts.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: prompts::SYSTEM,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        temperature: opts.temperature,
        max_tokens: opts.max_tokens,
        response_format: opts.json.then_some(ResponseFormat {
            kind: "json_object",
        }),
    }
}

#[async_trait]
impl Judge for OpenAiJudge {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn classify(&self, text: &str, rubric: &Rubric) -> Result<Classification, JudgeError> {
        let prompt = prompts::classification(text, rubric);
        let content = self.complete(&prompt, self.options(true, Some(120))).await?;
        parse_classification(&content)
    }

    async fn summarize(&self, context: &str, new_text: &str) -> Result<String, JudgeError> {
        let prompt = prompts::summary(context, new_text);
        let mut opts = self.options(false, Some(200));
        opts.temperature = opts.temperature.max(0.3);
        self.complete(&prompt, opts).await
    }

    async fn suggest_comparisons(
        &self,
        components: &[ComponentBrief],
        industry: Option<&str>,
    ) -> Result<Vec<ComparisonCandidate>, JudgeError> {
        let prompt = prompts::comparisons(components, industry);
        let content = self.complete(&prompt, self.options(true, None)).await?;
        parse_candidates(&content)
    }

    async fn score(&self, request: &ScoringRequest) -> Result<String, JudgeError> {
        let prompt = prompts::scoring(request);
        let opts = CallOptions {
            model: &self.scoring_model,
            json: true,
            max_tokens: None,
            temperature: self.temperature.max(0.3),
        };
        self.complete(&prompt, opts).await
    }
}

fn parse_candidates(content: &str) -> Result<Vec<ComparisonCandidate>, JudgeError> {
    Ok(match parse_structured_content::<CandidateList>(content)? {
        CandidateList::Wrapped { companies } => companies,
        CandidateList::Bare(list) => list,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const COMPLETION_FIXTURE: &str = r#"{
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": "  COMPLETE  "},
                "finish_reason": "stop"
            }
        ]
    }"#;

    #[test]
    fn not_configured_without_key() {
        let err = OpenAiJudge::new(&JudgeConfig::default()).err().unwrap();
        assert!(matches!(err, JudgeError::NotConfigured));
    }

    #[test]
    fn builds_with_key() {
        let config = JudgeConfig {
            api_key: "sk-test".into(),
            base_url: "http://localhost:8080/v1/".into(),
            ..Default::default()
        };
        let judge = OpenAiJudge::new(&config).unwrap();
        assert_eq!(judge.url, "http://localhost:8080/v1/chat/completions");
        assert_eq!(judge.name(), "openai");
    }

    #[test]
    fn request_body_shape() {
        let opts = CallOptions {
            model: "gpt-4o-mini",
            json: true,
            max_tokens: Some(10),
            temperature: 0.0,
        };
        let body = serde_json::to_value(build_request("hello", opts)).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hello");
        assert_eq!(body["max_tokens"], 10);
        assert_eq!(body["response_format"]["type"], "json_object");

        let plain = CallOptions {
            json: false,
            max_tokens: None,
            ..opts
        };
        let body = serde_json::to_value(build_request("hello", plain)).unwrap();
        assert!(body.get("response_format").is_none());
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn completion_content_is_trimmed() {
        let data: ChatResponse = serde_json::from_str(COMPLETION_FIXTURE).unwrap();
        assert_eq!(data.into_content().unwrap(), "COMPLETE");
    }

    #[test]
    fn empty_completion_is_malformed() {
        let data: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(matches!(data.into_content(), Err(JudgeError::Malformed(_))));

        let data: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(data.into_content().is_err());
    }

    #[test]
    fn candidates_parse_wrapped_and_bare() {
        let wrapped = r#"{"companies": [{"name": "Stripe", "description": "Payments", "relevance": "API-first"}]}"#;
        let list = parse_candidates(wrapped).unwrap();
        assert_eq!(list[0].name, "Stripe");
        assert_eq!(list[0].relevance, "API-first");

        let bare = r#"```json
[{"name": "Adyen", "description": "Payments"}]
```"#;
        let list = parse_candidates(bare).unwrap();
        assert_eq!(list[0].name, "Adyen");
        assert_eq!(list[0].relevance, "");
    }
}
