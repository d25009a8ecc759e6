//! Status handling for chat-completions responses.
//!
//! OpenAI-compatible endpoints report failures as
//! `{"error": {"message": ..., "type": ..., "code": ...}}`. The message is
//! surfaced in [`JudgeError::Api`]; a 429 is a retryable rate limit unless
//! the envelope says the quota is exhausted, which waiting will not fix.

use serde::Deserialize;

use crate::error::JudgeError;

/// Wait suggested when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_SECS: u64 = 20;

/// Longest error message kept from a response body.
const MAX_MESSAGE_CHARS: usize = 300;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl ErrorBody {
    fn is_quota(&self) -> bool {
        [self.kind.as_deref(), self.code.as_deref()]
            .into_iter()
            .flatten()
            .any(|v| v == "insufficient_quota")
    }
}

/// Pass a successful completion through, or map the failure.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, JudgeError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let retry_after = retry_after_secs(&resp);
    let raw = resp.text().await.unwrap_or_default();
    let envelope = serde_json::from_str::<ErrorEnvelope>(&raw).ok();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS
        && !envelope.as_ref().is_some_and(|e| e.error.is_quota())
    {
        return Err(JudgeError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_SECS),
        });
    }

    let message = envelope
        .map(|e| e.error.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(raw);
    Err(JudgeError::Api {
        status: status.as_u16(),
        message: clip(message.trim()),
    })
}

fn retry_after_secs(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn clip(message: &str) -> String {
    if message.chars().count() <= MAX_MESSAGE_CHARS {
        message.to_string()
    } else {
        let mut out: String = message.chars().take(MAX_MESSAGE_CHARS).collect();
        out.push('…');
        out
    }
}
