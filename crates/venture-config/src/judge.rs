//! Judge (LLM endpoint) configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_scoring_model() -> String {
    "gpt-4.1".to_string()
}

/// Default per-call timeout in seconds.
const fn default_timeout_secs() -> u64 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JudgeConfig {
    /// OpenAI-compatible API root (the `/chat/completions` path is appended).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the endpoint.
    #[serde(default)]
    pub api_key: String,

    /// Model used for classification and summaries.
    #[serde(default = "default_model")]
    pub model: String,

    /// Model used for report scoring.
    #[serde(default = "default_scoring_model")]
    pub scoring_model: String,

    /// Upper bound on a single judge call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature for verdicts.
    #[serde(default)]
    pub temperature: f32,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            model: default_model(),
            scoring_model: default_scoring_model(),
            timeout_secs: default_timeout_secs(),
            temperature: 0.0,
        }
    }
}

impl JudgeConfig {
    /// Check if the endpoint and credentials are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty()
    }

    /// Chat completions URL derived from `base_url`.
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "judge.timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "judge.temperature".into(),
                reason: format!("{} is outside 0.0..=2.0", self.temperature),
            });
        }
        Ok(())
    }
}
