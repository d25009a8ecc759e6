//! # venture-judge
//!
//! The judge capability: text classification, summarization, comparison
//! suggestions and report scoring delegated to an external model.
//!
//! [`Judge`] is the seam the orchestrator depends on. [`OpenAiJudge`] talks to
//! any OpenAI-compatible `/chat/completions` endpoint. Failures are always
//! signalled through [`JudgeError`], never disguised as a negative verdict.

mod error;
mod http;
mod offline;
mod openai;
pub mod parse;
pub mod prompts;

pub use error::JudgeError;
pub use offline::OfflineJudge;
pub use openai::OpenAiJudge;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use venture_core::entities::{ComparisonCandidate, TranscriptEntry};
use venture_core::enums::ComponentKey;

// ── Types ──────────────────────────────────────────────────────────

/// What a classification is asked to decide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rubric", rename_all = "snake_case")]
pub enum Rubric {
    /// Does the answer fully address the component's guiding question?
    /// Labels: `COMPLETE`, `INCOMPLETE`.
    Completeness { component: ComponentKey },
    /// Is the input a real answer to `question`, or a meta-question/confusion
    /// or gibberish? Labels: `GENUINE`, `META`, `GIBBERISH`.
    GenuineAnswer { question: String },
    /// Which component does the answer to `question` inform most?
    /// Labels: a component key.
    ComponentRelevance { question: String },
}

impl Rubric {
    pub const COMPLETE: &'static str = "COMPLETE";
    pub const INCOMPLETE: &'static str = "INCOMPLETE";
    pub const GENUINE: &'static str = "GENUINE";
    pub const META: &'static str = "META";
    pub const GIBBERISH: &'static str = "GIBBERISH";

    /// Labels the judge is asked to choose from.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        match self {
            Self::Completeness { .. } => vec![Self::COMPLETE, Self::INCOMPLETE],
            Self::GenuineAnswer { .. } => vec![Self::GENUINE, Self::META, Self::GIBBERISH],
            Self::ComponentRelevance { .. } => {
                ComponentKey::ALL.iter().map(|k| k.as_str()).collect()
            }
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Completeness { .. } => "completeness",
            Self::GenuineAnswer { .. } => "genuine_answer",
            Self::ComponentRelevance { .. } => "component_relevance",
        }
    }
}

/// A judge verdict. Unknown labels are passed through; callers decide how to
/// treat them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub confidence: Option<f32>,
    pub reason: Option<String>,
}

impl Classification {
    /// Case-insensitive label comparison.
    #[must_use]
    pub fn is(&self, label: &str) -> bool {
        self.label.trim().eq_ignore_ascii_case(label)
    }
}

/// A confirmed component as shown to the judge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentBrief {
    pub key: ComponentKey,
    pub title: String,
    pub summary: String,
}

/// Everything needed to score a consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub business_name: String,
    pub industry: Option<String>,
    pub components: Vec<ComponentBrief>,
    pub history: Vec<TranscriptEntry>,
    pub comparisons: Vec<String>,
}

// ── Capability ─────────────────────────────────────────────────────

/// External oracle for every natural-language judgment the orchestrator
/// needs. Implementations may be slow or fail; callers bound each call with a
/// timeout and own the fallback policy.
#[async_trait]
pub trait Judge: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Classify `text` under `rubric`.
    async fn classify(&self, text: &str, rubric: &Rubric) -> Result<Classification, JudgeError>;

    /// Produce a concise summary of `new_text` in light of `context`.
    async fn summarize(&self, context: &str, new_text: &str) -> Result<String, JudgeError>;

    /// Propose benchmark entities for the confirmed components.
    async fn suggest_comparisons(
        &self,
        components: &[ComponentBrief],
        industry: Option<&str>,
    ) -> Result<Vec<ComparisonCandidate>, JudgeError>;

    /// Score the consultation. Returns the raw structured document; parsing
    /// it is the caller's job so malformed output stays distinguishable from
    /// transport failure.
    async fn score(&self, request: &ScoringRequest) -> Result<String, JudgeError>;
}
