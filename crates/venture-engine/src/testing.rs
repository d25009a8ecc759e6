//! Scripted judge for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use venture_core::entities::ComparisonCandidate;
use venture_judge::{Classification, ComponentBrief, Judge, JudgeError, Rubric, ScoringRequest};

/// Judge with fixed answers per rubric. `None` makes that call fail.
pub struct ScriptedJudge {
    pub completeness: Option<&'static str>,
    pub genuine: Option<(&'static str, f32)>,
    pub relevance: Option<&'static str>,
    pub summaries: bool,
    pub candidates: Option<Vec<ComparisonCandidate>>,
    pub score_doc: Option<String>,
    pub delay: Option<Duration>,
    pub classify_calls: AtomicUsize,
    pub summarize_calls: AtomicUsize,
    pub score_calls: AtomicUsize,
}

impl ScriptedJudge {
    pub fn accepting() -> Self {
        Self {
            completeness: Some(Rubric::COMPLETE),
            genuine: Some((Rubric::GENUINE, 0.9)),
            relevance: Some("market_size"),
            summaries: true,
            candidates: Some(candidates(6)),
            score_doc: Some(sample_report_doc()),
            delay: None,
            classify_calls: AtomicUsize::new(0),
            summarize_calls: AtomicUsize::new(0),
            score_calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            completeness: Some(Rubric::INCOMPLETE),
            ..Self::accepting()
        }
    }

    pub fn failing() -> Self {
        Self {
            completeness: None,
            genuine: None,
            relevance: None,
            summaries: false,
            candidates: None,
            score_doc: None,
            ..Self::accepting()
        }
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn unavailable() -> JudgeError {
    JudgeError::Api {
        status: 503,
        message: "scripted outage".into(),
    }
}

pub fn candidates(count: usize) -> Vec<ComparisonCandidate> {
    (1..=count)
        .map(|i| ComparisonCandidate {
            name: format!("Company {i}"),
            description: format!("Benchmark number {i}"),
            relevance: "same market".into(),
        })
        .collect()
}

pub fn sample_report_doc() -> String {
    serde_json::json!({
        "evaluation_feedback": {
            "Value Proposition": {"score": "4/5", "rationale": "Clear benefit."},
            "USP & Competitive Advantage": {"score": "3/5", "rationale": "Some moat."},
            "Market Opportunity & Growth": {"score": 4, "rationale": "Growing market."},
            "Execution Feasibility": {"score": "3.5/5", "rationale": "Needs a team."},
            "Sustainability": {"score": "2/5", "rationale": "Thin margins."},
            "overall": {"score": "16.5/25", "feedback": "Promising but early."}
        },
        "ai_investment_recommendation": "MAYBE",
        "investment_rationale": "Worth a second meeting."
    })
    .to_string()
}

#[async_trait]
impl Judge for ScriptedJudge {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn classify(&self, _text: &str, rubric: &Rubric) -> Result<Classification, JudgeError> {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        let scripted = match rubric {
            Rubric::Completeness { .. } => self.completeness.map(|label| (label, None)),
            Rubric::GenuineAnswer { .. } => self.genuine.map(|(label, c)| (label, Some(c))),
            Rubric::ComponentRelevance { .. } => self.relevance.map(|label| (label, None)),
        };
        scripted
            .map(|(label, confidence)| Classification {
                label: label.to_string(),
                confidence,
                reason: (label == Rubric::INCOMPLETE).then(|| "needs more detail".to_string()),
            })
            .ok_or_else(unavailable)
    }

    async fn summarize(&self, _context: &str, new_text: &str) -> Result<String, JudgeError> {
        self.summarize_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.summaries {
            Ok(format!("Summary: {}", new_text.trim()))
        } else {
            Err(unavailable())
        }
    }

    async fn suggest_comparisons(
        &self,
        _components: &[ComponentBrief],
        _industry: Option<&str>,
    ) -> Result<Vec<ComparisonCandidate>, JudgeError> {
        self.pause().await;
        self.candidates.clone().ok_or_else(unavailable)
    }

    async fn score(&self, _request: &ScoringRequest) -> Result<String, JudgeError> {
        self.score_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.score_doc.clone().ok_or_else(unavailable)
    }
}
